//! Type tags and the values they describe.
//!
//! Every type that can be an argument or a result of a conversion is listed
//! once in the table at the bottom of this file. The table produces the
//! [`TypeTag`] enum, the [`Value`] enum with one variant per tag, and the
//! conversions between each payload type and `Value`. Adding a type to the
//! boundary means adding one line there.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use protomap_component::{App, Component, DeploymentConfig, JobInfo, LabelSet, Project, Source};
use protomap_terminal::Ui;
use protomap_wire::{
    ArgsDataDirApp, ArgsDataDirComponent, ArgsDataDirProject, ArgsDeploymentConfig, ArgsJobInfo,
    ArgsLabelSet, ArgsLogger, ArgsSource, ArgsTerminalUi,
};

use crate::context::CallContext;
use crate::internal::Internal;
use crate::logger::Logger;

/// Which side of the boundary a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Supplied by the transport for every call; never resolved.
    Ambient,
    /// In-process value consumed or produced by plugin code.
    Native,
    /// Message form exchanged across the boundary.
    Wire,
}

/// A live terminal, local or remote.
#[derive(Clone)]
pub struct TerminalUi(Arc<dyn Ui>);

impl TerminalUi {
    pub fn new(ui: Arc<dyn Ui>) -> Self {
        Self(ui)
    }

    pub fn into_inner(self) -> Arc<dyn Ui> {
        self.0
    }

    /// Whether two handles refer to the same terminal.
    pub fn ptr_eq(&self, other: &TerminalUi) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for TerminalUi {
    type Target = dyn Ui;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for TerminalUi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TerminalUi { .. }")
    }
}

/// A [`Value`] held a different type than the one asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueMismatch {
    pub expected: TypeTag,
    pub found: TypeTag,
}

/// A payload type with a fixed tag.
pub trait Typed: Into<Value> + TryFrom<Value, Error = ValueMismatch> {
    const TAG: TypeTag;
}

macro_rules! value_types {
    ($( $(#[$doc:meta])* $tag:ident($ty:ty) : $kind:ident; )*) => {
        /// Identifies one semantic type at the plugin boundary.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TypeTag {
            $( $(#[$doc])* $tag, )*
        }

        impl TypeTag {
            /// Every tag, in declaration order.
            pub const ALL: &'static [TypeTag] = &[$( TypeTag::$tag, )*];

            pub fn name(&self) -> &'static str {
                match self {
                    $( TypeTag::$tag => stringify!($tag), )*
                }
            }

            pub fn kind(&self) -> TagKind {
                match self {
                    $( TypeTag::$tag => TagKind::$kind, )*
                }
            }
        }

        /// One value of any boundary type, tagged by variant.
        #[derive(Debug, Clone)]
        pub enum Value {
            $( $tag($ty), )*
        }

        impl Value {
            pub fn tag(&self) -> TypeTag {
                match self {
                    $( Value::$tag(_) => TypeTag::$tag, )*
                }
            }
        }

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$tag(value)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = ValueMismatch;

                fn try_from(value: Value) -> Result<Self, ValueMismatch> {
                    match value {
                        Value::$tag(inner) => Ok(inner),
                        other => Err(ValueMismatch {
                            expected: TypeTag::$tag,
                            found: other.tag(),
                        }),
                    }
                }
            }

            impl Typed for $ty {
                const TAG: TypeTag = TypeTag::$tag;
            }
        )*
    };
}

value_types! {
    /// Cancellation and deadline for the call.
    Context(CallContext): Ambient;
    /// Logger for the call.
    Logger(Logger): Ambient;
    /// Handle to plugin runtime internals.
    Internal(Internal): Ambient;

    Source(Source): Native;
    JobInfo(JobInfo): Native;
    DeploymentConfig(DeploymentConfig): Native;
    DataDirProject(Project): Native;
    DataDirApp(App): Native;
    DataDirComponent(Component): Native;
    LabelSet(LabelSet): Native;
    TerminalUi(TerminalUi): Native;

    ArgsSource(ArgsSource): Wire;
    ArgsJobInfo(ArgsJobInfo): Wire;
    ArgsDeploymentConfig(ArgsDeploymentConfig): Wire;
    ArgsDataDirProject(ArgsDataDirProject): Wire;
    ArgsDataDirApp(ArgsDataDirApp): Wire;
    ArgsDataDirComponent(ArgsDataDirComponent): Wire;
    ArgsLogger(ArgsLogger): Wire;
    ArgsLabelSet(ArgsLabelSet): Wire;
    ArgsTerminalUi(ArgsTerminalUi): Wire;
}

impl TypeTag {
    pub fn is_ambient(&self) -> bool {
        self.kind() == TagKind::Ambient
    }

    pub fn is_wire(&self) -> bool {
        self.kind() == TagKind::Wire
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
