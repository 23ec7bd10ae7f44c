//! Values available to one call.

use std::collections::HashMap;

use crate::context::CallContext;
use crate::internal::Internal;
use crate::logger::Logger;
use crate::value::{TypeTag, Value};

/// The ambient values the transport supplies to every call.
#[derive(Debug, Clone)]
pub struct Ambient {
    pub context: CallContext,
    pub logger: Logger,
    pub internal: Internal,
}

impl Ambient {
    pub fn new(context: CallContext, logger: Logger, internal: Internal) -> Self {
        Self {
            context,
            logger,
            internal,
        }
    }
}

/// Typed values available to one call, at most one per tag.
///
/// Starts with the ambient values and the call's wire arguments, and grows
/// as the resolver stores what it derives.
#[derive(Debug, Clone)]
pub struct ArgumentBag {
    values: HashMap<TypeTag, Value>,
}

impl ArgumentBag {
    pub fn new(ambient: Ambient) -> Self {
        let mut values = HashMap::new();
        values.insert(TypeTag::Context, Value::Context(ambient.context));
        values.insert(TypeTag::Logger, Value::Logger(ambient.logger));
        values.insert(TypeTag::Internal, Value::Internal(ambient.internal));
        Self { values }
    }

    /// Add the call's wire arguments.
    pub fn with_args(mut self, args: impl IntoIterator<Item = Value>) -> Self {
        for arg in args {
            self.insert(arg);
        }
        self
    }

    /// Store a value under its tag, returning what it replaced.
    pub fn insert(&mut self, value: Value) -> Option<Value> {
        self.values.insert(value.tag(), value)
    }

    pub fn get(&self, tag: TypeTag) -> Option<&Value> {
        self.values.get(&tag)
    }

    pub fn contains(&self, tag: TypeTag) -> bool {
        self.values.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tags present, sorted.
    pub fn tags(&self) -> Vec<TypeTag> {
        let mut tags: Vec<_> = self.values.keys().copied().collect();
        tags.sort();
        tags
    }

    /// The ambient values of this bag.
    pub fn ambient(&self) -> Option<Ambient> {
        match (
            self.get(TypeTag::Context),
            self.get(TypeTag::Logger),
            self.get(TypeTag::Internal),
        ) {
            (Some(Value::Context(c)), Some(Value::Logger(l)), Some(Value::Internal(i))) => {
                Some(Ambient::new(c.clone(), l.clone(), i.clone()))
            }
            _ => None,
        }
    }
}
