//! # Stream broker
//!
//! A broker multiplexes many logical streams over the one connection that
//! links a host to a plugin. Streams are addressed by [`StreamId`]s:
//!
//! - The **producer** side allocates an id with [`Broker::next_id`] and
//!   starts serving on it with [`Broker::accept_and_serve`].
//! - The **consumer** side learns the id (usually inside a wire message) and
//!   opens a [`Connection`] to it with [`Broker::dial`].
//!
//! Server loops started by `accept_and_serve` belong to the broker, not to
//! whatever call allocated the id. They keep accepting until the broker
//! itself shuts down.
//!
//! [`MemoryBroker`] is an in-process implementation where both sides share
//! one hub. It is what the tests and demos run against, and what a
//! transport implementation is measured against.

mod connection;
mod error;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub use connection::{Connection, StreamId};
pub use error::{BrokerError, Result};
pub use memory::{BrokerConfig, MemoryBroker};

/// Boxed error returned by a server loop.
pub type ServeError = Box<dyn std::error::Error + Send + Sync>;

/// Something that can serve accepted connections.
///
/// `serve` is called once per accepted connection, on its own task. It
/// should return when the peer closes the connection.
#[async_trait]
pub trait StreamServer: Send + Sync {
    async fn serve(&self, conn: Connection) -> std::result::Result<(), ServeError>;
}

/// A shared, internally synchronized stream multiplexer.
///
/// Implementations must tolerate concurrent use from any number of calls.
#[async_trait]
pub trait Broker: Send + Sync + std::fmt::Debug {
    /// Allocate a stream id that has never been handed out before.
    fn next_id(&self) -> StreamId;

    /// Open a connection to a stream someone is serving.
    ///
    /// Waits for the other side to start serving `id`, up to the broker's
    /// dial timeout. Returns promptly with [`BrokerError::Cancelled`] once
    /// `cancel` fires.
    async fn dial(&self, cancel: &CancellationToken, id: StreamId) -> Result<Connection>;

    /// Serve every connection dialed to `id` with `server`.
    ///
    /// The returned task runs until the broker shuts down. Dropping the
    /// handle detaches it.
    fn accept_and_serve(&self, id: StreamId, server: Arc<dyn StreamServer>) -> JoinHandle<()>;
}
