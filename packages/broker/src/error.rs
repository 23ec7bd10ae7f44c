//! Error types for the stream broker.

use std::time::Duration;

use thiserror::Error;

use crate::StreamId;

/// Errors that can occur while dialing or using a stream.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Nobody started serving the stream before the dial timeout.
    #[error("timeout dialing stream {id} after {timeout:?}")]
    Timeout { id: StreamId, timeout: Duration },

    /// The dial was cancelled by its caller.
    #[error("dial of stream {0} cancelled")]
    Cancelled(StreamId),

    /// The broker has shut down.
    #[error("broker closed")]
    Closed,

    /// The other end of a connection went away.
    #[error("stream {0} closed by peer")]
    PeerClosed(StreamId),
}

/// Result type alias for broker operations.
pub type Result<T> = std::result::Result<T, BrokerError>;
