//! Native types seen by plugin implementations.
//!
//! Plugin code works with these values directly. How they got here (decoded
//! from a wire message, or handed over in-process) is the mapper layer's
//! concern, not the plugin's.

pub mod datadir;
mod labels;
mod metadata;

pub use datadir::{App, BasicDir, Component, Dir, Project};
pub use labels::LabelSet;
pub use metadata::{DeploymentConfig, JobInfo, Source};
