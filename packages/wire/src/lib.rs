//! Wire representations of plugin call arguments.
//!
//! These are the messages exchanged across the plugin boundary. The host and
//! plugin never share native values directly; every argument travels as one
//! of the `Args*` messages defined here and is mapped to (or from) its native
//! form by the mapper layer.
//!
//! - [`args`]: the argument message schema
//! - [`transcode`]: structural field-by-field mapping between two serde types
//! - [`encode_frame`] / [`decode_frame`]: JSON framing for side-channel streams

pub use bytes::Bytes;

pub mod args;
mod codec;
mod error;

pub use args::{
    ArgsDataDirApp, ArgsDataDirComponent, ArgsDataDirProject, ArgsDeploymentConfig, ArgsJobInfo,
    ArgsLabelSet, ArgsLogger, ArgsSource, ArgsTerminalUi,
};
pub use codec::{decode_frame, encode_frame, transcode};
pub use error::WireError;
