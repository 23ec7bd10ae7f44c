//! Conversions between boundary types.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ConversionError;
use crate::scope::CleanupScope;
use crate::value::{TypeTag, Typed, Value};

/// Produces one value from its declared inputs.
///
/// Implementations get their inputs in the order the entry declares them.
/// Anything that must be released when the call ends is registered on
/// `scope`.
#[async_trait]
pub trait Conversion: Send + Sync {
    async fn convert(&self, inputs: Inputs, scope: &CleanupScope)
        -> Result<Value, ConversionError>;
}

/// Inputs handed to a conversion, one slot per declared input.
#[derive(Debug)]
pub struct Inputs {
    slots: Vec<Option<Value>>,
}

impl Inputs {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            slots: values.into_iter().map(Some).collect(),
        }
    }

    /// Take the first remaining input of type `T`.
    pub fn take<T: Typed>(&mut self) -> Result<T, ConversionError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| matches!(slot, Some(v) if v.tag() == T::TAG))
            .and_then(Option::take)
            .ok_or(ConversionError::MissingInput(T::TAG))?;
        Ok(T::try_from(slot)?)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Pure<F>(F);

#[async_trait]
impl<F> Conversion for Pure<F>
where
    F: Fn(&mut Inputs) -> Result<Value, ConversionError> + Send + Sync,
{
    async fn convert(
        &self,
        mut inputs: Inputs,
        _scope: &CleanupScope,
    ) -> Result<Value, ConversionError> {
        (self.0)(&mut inputs)
    }
}

/// One row of the registry: what a conversion needs and what it makes.
#[derive(Clone)]
pub struct ConversionEntry {
    pub name: &'static str,
    pub inputs: Vec<TypeTag>,
    pub output: TypeTag,
    /// Whether the conversion may reject well-typed input. The resolver
    /// logs a failure of an infallible entry as a warning, since it points at
    /// a broken conversion rather than bad input.
    pub fallible: bool,
    pub conversion: Arc<dyn Conversion>,
}

impl ConversionEntry {
    pub fn new(
        name: &'static str,
        inputs: impl Into<Vec<TypeTag>>,
        output: TypeTag,
        conversion: impl Conversion + 'static,
    ) -> Self {
        Self {
            name,
            inputs: inputs.into(),
            output,
            fallible: true,
            conversion: Arc::new(conversion),
        }
    }

    /// An entry backed by a synchronous function.
    pub fn pure<F>(
        name: &'static str,
        inputs: impl Into<Vec<TypeTag>>,
        output: TypeTag,
        f: F,
    ) -> Self
    where
        F: Fn(&mut Inputs) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        Self::new(name, inputs, output, Pure(f))
    }

    /// Mark the entry as one that never fails on well-typed input.
    pub fn infallible(mut self) -> Self {
        self.fallible = false;
        self
    }
}

impl fmt::Debug for ConversionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionEntry")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("output", &self.output)
            .field("fallible", &self.fallible)
            .finish()
    }
}
