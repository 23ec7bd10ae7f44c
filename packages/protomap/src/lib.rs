//! protomap: typed argument mapping across a plugin RPC boundary.
//!
//! Plugin entry points take native values. Calls arrive carrying wire
//! messages. protomap resolves one into the other through a fixed table of
//! conversions, and maps results back the same way.
//!
//! The workspace is layered; this crate re-exports each layer:
//!
//! - [`wire`]: the `Args*` messages and framing
//! - [`component`]: native values plugin code works with
//! - [`broker`]: side-channel streams between host and plugin
//! - [`terminal`]: interactive terminal that works over a stream
//! - [`engine`]: registry, resolver, per-call state and dispatch
//! - [`mappers`]: the standard conversion table
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(protomap::mappers::standard_registry()?);
//! let dispatcher = protomap::Dispatcher::new(protomap::Resolver::new(registry));
//! # let _ = dispatcher;
//! # Ok(())
//! # }
//! ```

pub use protomap_broker as broker;
pub use protomap_component as component;
pub use protomap_core as engine;
pub use protomap_mappers as mappers;
pub use protomap_terminal as terminal;
pub use protomap_wire as wire;

pub use protomap_core::{
    Ambient, ArgumentBag, CallContext, CleanupScope, Dispatcher, EntryPoint, LogRoot, Logger,
    Registry, ResolveError, Resolver, Signature, TypeTag, Value,
};
