//! Error types for terminal UI operations.

use protomap_broker::BrokerError;
use protomap_wire::WireError;
use thiserror::Error;

/// Errors from a [`Ui`](crate::Ui).
#[derive(Debug, Error)]
pub enum UiError {
    /// Input was requested from a terminal that cannot provide it.
    #[error("terminal is not interactive")]
    NonInteractive,

    /// The stream to the remote terminal is gone.
    #[error("terminal stream closed")]
    Closed,

    /// Sending or receiving on the stream failed.
    #[error("terminal transport error: {0}")]
    Transport(#[from] BrokerError),

    /// A frame could not be encoded or decoded.
    #[error("terminal protocol error: {0}")]
    Wire(#[from] WireError),

    /// The remote implementation returned an error.
    #[error("remote terminal error: {0}")]
    Remote(String),

    /// The remote side answered with the wrong kind of response.
    #[error("unexpected response to {request}")]
    UnexpectedResponse { request: &'static str },
}

/// Result type alias for terminal UI operations.
pub type Result<T> = std::result::Result<T, UiError>;
