//! The immutable table of conversions.

use std::collections::HashMap;

use tracing::debug;

use crate::conversion::ConversionEntry;
use crate::dispatch::Signature;
use crate::error::RegistryError;
use crate::resolver::MAX_CHAIN_DEPTH;
use crate::value::TypeTag;

/// Conversions indexed by the tag they produce.
///
/// Built once at startup and shared read-only by every call. Two entries
/// producing the same tag are rejected, since nothing would tell them apart
/// at resolution time.
#[derive(Debug, Default)]
pub struct Registry {
    by_output: HashMap<TypeTag, Vec<ConversionEntry>>,
    order: Vec<TypeTag>,
}

impl Registry {
    /// Build the table. Entries producing an ambient tag are accepted, but
    /// the resolver never runs them: every call already has its ambient
    /// values.
    pub fn register(
        entries: impl IntoIterator<Item = ConversionEntry>,
    ) -> Result<Registry, RegistryError> {
        let mut registry = Registry::default();
        for entry in entries {
            if entry.inputs.contains(&entry.output) {
                return Err(RegistryError::SelfReferential {
                    name: entry.name,
                    output: entry.output,
                });
            }
            if let Some(existing) = registry.by_output.get(&entry.output).and_then(|e| e.first()) {
                return Err(RegistryError::Duplicate {
                    output: entry.output,
                    first: existing.name,
                    second: entry.name,
                });
            }
            registry.order.push(entry.output);
            registry.by_output.entry(entry.output).or_default().push(entry);
        }
        debug!(conversions = registry.len(), "registry built");
        Ok(registry)
    }

    /// Entries producing `output`. Empty when nothing does.
    pub fn lookup(&self, output: TypeTag) -> &[ConversionEntry] {
        self.by_output
            .get(&output)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Produced tags in registration order.
    pub fn outputs(&self) -> &[TypeTag] {
        &self.order
    }

    /// Every entry in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ConversionEntry> {
        self.order.iter().flat_map(|tag| self.lookup(*tag))
    }

    /// Tags `signature` needs that no chain of conversions can produce.
    ///
    /// Inputs are checked against what any call supplies: the ambient
    /// values and wire messages. The reply is checked against the ambient
    /// values plus the entry point's result. An empty list means every
    /// call with well-formed wire arguments can be resolved.
    pub fn missing(&self, signature: &Signature) -> Vec<TypeTag> {
        self.missing_within(signature, MAX_CHAIN_DEPTH)
    }

    /// [`missing`](Self::missing) with chains bounded at `max_depth`
    /// nested conversions, matching a resolver configured the same way.
    pub fn missing_within(&self, signature: &Signature, max_depth: usize) -> Vec<TypeTag> {
        let mut missing = Vec::new();
        let supplied = |tag: &TypeTag| tag.is_ambient() || tag.is_wire();
        for &input in &signature.inputs {
            if !self.producible(input, &supplied, max_depth, &mut Vec::new()) && !missing.contains(&input) {
                missing.push(input);
            }
        }
        if let (Some(output), Some(reply)) = (signature.output, signature.reply) {
            let from_result = |tag: &TypeTag| tag.is_ambient() || *tag == output;
            if !self.producible(reply, &from_result, max_depth, &mut Vec::new()) {
                missing.push(reply);
            }
        }
        missing
    }

    fn producible(
        &self,
        target: TypeTag,
        supplied: &dyn Fn(&TypeTag) -> bool,
        max_depth: usize,
        stack: &mut Vec<TypeTag>,
    ) -> bool {
        if supplied(&target) {
            return true;
        }
        if stack.contains(&target) || stack.len() >= max_depth {
            return false;
        }
        stack.push(target);
        let found = self.lookup(target).iter().any(|entry| {
            entry
                .inputs
                .iter()
                .all(|&input| self.producible(input, supplied, max_depth, stack))
        });
        stack.pop();
        found
    }
}
