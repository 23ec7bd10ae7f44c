//! Error types for registration and resolution.

use std::fmt;

use protomap_broker::BrokerError;
use protomap_terminal::UiError;
use protomap_wire::WireError;
use thiserror::Error;

use crate::context::Cancelled;
use crate::value::{TypeTag, ValueMismatch};

/// The registry table is malformed. Detected when the registry is built.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two entries produce the same tag, and nothing tells them apart.
    #[error("conversions {first} and {second} both produce {output}")]
    Duplicate {
        output: TypeTag,
        first: &'static str,
        second: &'static str,
    },

    /// An entry lists its own output among its inputs.
    #[error("conversion {name} consumes its own output {output}")]
    SelfReferential { name: &'static str, output: TypeTag },
}

/// A conversion rejected its input or could not complete.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// A declared input was not passed in.
    #[error("missing input {0}")]
    MissingInput(TypeTag),

    /// An input or the produced value had the wrong type.
    #[error(transparent)]
    Mismatch(#[from] ValueMismatch),

    /// Structural mapping between representations failed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The input was well-typed but not acceptable.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// Opening a side-channel stream failed.
    #[error("stream unavailable: {0}")]
    Transport(#[from] BrokerError),

    /// The call ended while the conversion was waiting.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// Setting up a terminal over a stream failed.
    #[error("terminal setup failed: {0}")]
    Terminal(#[from] UiError),
}

impl ConversionError {
    /// Whether the failure came from the transport rather than the data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ConversionError::Transport(_)
                | ConversionError::Cancelled(_)
                | ConversionError::Terminal(UiError::Transport(_) | UiError::Closed)
        )
    }
}

/// Why a type could not be produced even though the table may cover it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvableReason {
    /// An ambient value was missing from the bag.
    MissingAmbient,
    /// A conversion needs an input that nothing can produce.
    MissingInput(TypeTag),
    /// Resolving the type requires the type itself.
    Cycle(Vec<TypeTag>),
    /// The chain of conversions is longer than allowed.
    DepthExceeded { max: usize },
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvableReason::MissingAmbient => write!(f, "ambient value not supplied"),
            UnresolvableReason::MissingInput(tag) => write!(f, "no way to produce input {}", tag),
            UnresolvableReason::Cycle(path) => {
                write!(f, "cycle through ")?;
                for (i, tag) in path.iter().enumerate() {
                    if i > 0 {
                        write!(f, " -> ")?;
                    }
                    write!(f, "{}", tag)?;
                }
                Ok(())
            }
            UnresolvableReason::DepthExceeded { max } => {
                write!(f, "conversion chain deeper than {}", max)
            }
        }
    }
}

/// Resolution of one type failed. Fails the call, never the process.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Nothing is registered to produce the type.
    #[error("no mapper for {target}")]
    NoMapper { target: TypeTag },

    /// The table covers the type but it can't be reached from this bag.
    #[error("cannot resolve {target}: {reason}")]
    Unresolvable {
        target: TypeTag,
        reason: UnresolvableReason,
    },

    /// The conversion producing the type failed.
    #[error("conversion {conversion} to {target} failed: {source}")]
    ConversionFailed {
        target: TypeTag,
        conversion: &'static str,
        #[source]
        source: ConversionError,
    },

    /// The conversion needed a stream and couldn't get one.
    #[error("transport unavailable for {target} ({conversion}): {source}")]
    TransportUnavailable {
        target: TypeTag,
        conversion: &'static str,
        #[source]
        source: ConversionError,
    },
}

impl ResolveError {
    /// The type whose resolution failed.
    pub fn target(&self) -> TypeTag {
        match self {
            ResolveError::NoMapper { target }
            | ResolveError::Unresolvable { target, .. }
            | ResolveError::ConversionFailed { target, .. }
            | ResolveError::TransportUnavailable { target, .. } => *target,
        }
    }

    pub(crate) fn from_conversion(
        target: TypeTag,
        conversion: &'static str,
        source: ConversionError,
    ) -> Self {
        if source.is_transport() {
            ResolveError::TransportUnavailable {
                target,
                conversion,
                source,
            }
        } else {
            ResolveError::ConversionFailed {
                target,
                conversion,
                source,
            }
        }
    }
}
