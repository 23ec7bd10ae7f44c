//! Error types for wire encoding.

use thiserror::Error;

/// Errors produced while encoding or decoding wire messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// A value could not be serialized.
    #[error("encode error ({type_name}): {message}")]
    Encode {
        type_name: &'static str,
        message: String,
    },

    /// Bytes or an intermediate value could not be deserialized.
    #[error("decode error ({type_name}): {message}")]
    Decode {
        type_name: &'static str,
        message: String,
    },
}

impl WireError {
    pub(crate) fn encode<T: ?Sized, M: ToString>(message: M) -> Self {
        WireError::Encode {
            type_name: std::any::type_name::<T>(),
            message: message.to_string(),
        }
    }

    pub(crate) fn decode<T: ?Sized, M: ToString>(message: M) -> Self {
        WireError::Decode {
            type_name: std::any::type_name::<T>(),
            message: message.to_string(),
        }
    }
}
