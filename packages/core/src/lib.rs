//! # Argument resolution for plugin calls
//!
//! Plugin entry points want native values: a [`Source`], a [`Project`]
//! directory handle, a live terminal. What arrives over the wire are
//! messages. This crate bridges the two:
//!
//! - [`TypeTag`] names every type that can flow through a call, and
//!   [`Value`] carries one value of any of them.
//! - A [`ConversionEntry`] turns some input tags into one output tag.
//!   Entries are collected once, at startup, into an immutable [`Registry`].
//! - An [`ArgumentBag`] holds what one call has available: the ambient
//!   values every call gets ([`CallContext`], [`Logger`], [`Internal`]) plus
//!   whatever wire arguments came with it.
//! - The [`Resolver`] produces a requested tag from a bag, chaining
//!   conversions where needed and remembering what it derived.
//! - A [`CleanupScope`] collects release actions registered while resolving
//!   and runs them when the call ends.
//! - The [`Dispatcher`] puts it together for one inbound call: resolve the
//!   entry point's arguments, call it, and map its result back to the wire.
//!
//! ```text
//!  wire args ──► ArgumentBag ──► Resolver ──► entry point ──► Resolver ──► wire reply
//!                   ▲   (ambient: context, logger, internal)     │
//!                   └──────────── CleanupScope ◄─────────────────┘
//! ```
//!
//! [`Source`]: protomap_component::Source
//! [`Project`]: protomap_component::Project

mod bag;
mod context;
mod conversion;
mod dispatch;
mod error;
mod internal;
mod logger;
mod registry;
mod resolver;
mod scope;
mod value;

pub use bag::{Ambient, ArgumentBag};
pub use context::{CallContext, Cancelled};
pub use conversion::{Conversion, ConversionEntry, Inputs};
pub use dispatch::{DispatchError, Dispatcher, EntryError, EntryPoint, Signature};
pub use error::{ConversionError, RegistryError, ResolveError, UnresolvableReason};
pub use internal::Internal;
pub use logger::{LogRoot, Logger};
pub use registry::Registry;
pub use resolver::{Resolver, ResolverConfig, MAX_CHAIN_DEPTH};
pub use scope::CleanupScope;
pub use value::{TagKind, TerminalUi, TypeTag, Typed, Value, ValueMismatch};
