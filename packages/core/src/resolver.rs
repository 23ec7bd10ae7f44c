//! Producing a requested type from what a call has.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::bag::ArgumentBag;
use crate::conversion::Inputs;
use crate::error::{ResolveError, UnresolvableReason};
use crate::registry::Registry;
use crate::scope::CleanupScope;
use crate::value::{TypeTag, Value};

/// Longest chain of conversions one resolution may nest.
pub const MAX_CHAIN_DEPTH: usize = 4;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Conversions that may be in progress at once for one request.
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_CHAIN_DEPTH,
        }
    }
}

type ResolveFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ResolveError>> + Send + 'a>>;

/// Resolves type tags against an [`ArgumentBag`] using a shared [`Registry`].
///
/// Cheap to clone. One resolver serves any number of concurrent calls; all
/// per-call state lives in the bag and the scope passed to [`resolve`].
///
/// [`resolve`]: Resolver::resolve
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<Registry>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, ResolverConfig::default())
    }

    pub fn with_config(registry: Arc<Registry>, config: ResolverConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Tags `signature` needs that this resolver can't produce.
    ///
    /// Same check as [`Registry::missing`], bounded by this resolver's
    /// `max_depth`.
    pub fn missing(&self, signature: &crate::dispatch::Signature) -> Vec<TypeTag> {
        self.registry.missing_within(signature, self.config.max_depth)
    }

    /// Produce a value of type `target`.
    ///
    /// A value already in `bag` is returned as is. Otherwise the registered
    /// conversion for `target` runs after its inputs are resolved the same
    /// way, left to right. Everything produced along the way is stored in
    /// `bag`, so asking again in the same call converts nothing.
    pub async fn resolve(
        &self,
        target: TypeTag,
        bag: &mut ArgumentBag,
        scope: &CleanupScope,
    ) -> Result<Value, ResolveError> {
        let mut in_progress = Vec::new();
        self.resolve_in(target, bag, scope, &mut in_progress).await
    }

    /// Resolve `target` and unwrap it as `T`.
    pub async fn resolve_as<T: crate::value::Typed>(
        &self,
        bag: &mut ArgumentBag,
        scope: &CleanupScope,
    ) -> Result<T, ResolveError> {
        let value = self.resolve(T::TAG, bag, scope).await?;
        T::try_from(value).map_err(|mismatch| ResolveError::ConversionFailed {
            target: T::TAG,
            conversion: "resolve",
            source: mismatch.into(),
        })
    }

    fn resolve_in<'a>(
        &'a self,
        target: TypeTag,
        bag: &'a mut ArgumentBag,
        scope: &'a CleanupScope,
        in_progress: &'a mut Vec<TypeTag>,
    ) -> ResolveFuture<'a> {
        Box::pin(async move {
            if let Some(value) = bag.get(target) {
                trace!(%target, "already in bag");
                return Ok(value.clone());
            }
            if target.is_ambient() {
                return Err(ResolveError::Unresolvable {
                    target,
                    reason: UnresolvableReason::MissingAmbient,
                });
            }

            let entry = match self.registry.lookup(target).first() {
                Some(entry) => entry,
                None => return Err(ResolveError::NoMapper { target }),
            };

            if in_progress.contains(&target) {
                let mut path = in_progress.clone();
                path.push(target);
                return Err(ResolveError::Unresolvable {
                    target,
                    reason: UnresolvableReason::Cycle(path),
                });
            }
            if in_progress.len() >= self.config.max_depth {
                return Err(ResolveError::Unresolvable {
                    target,
                    reason: UnresolvableReason::DepthExceeded {
                        max: self.config.max_depth,
                    },
                });
            }

            in_progress.push(target);
            let mut values = Vec::with_capacity(entry.inputs.len());
            for &input in &entry.inputs {
                // Wire values only arrive with the call; they are never derived.
                if input.is_wire() && !bag.contains(input) {
                    in_progress.pop();
                    return Err(ResolveError::Unresolvable {
                        target,
                        reason: UnresolvableReason::MissingInput(input),
                    });
                }
                match self.resolve_in(input, bag, scope, in_progress).await {
                    Ok(value) => values.push(value),
                    Err(ResolveError::NoMapper { target: missing }) => {
                        in_progress.pop();
                        return Err(ResolveError::Unresolvable {
                            target,
                            reason: UnresolvableReason::MissingInput(missing),
                        });
                    }
                    Err(e) => {
                        in_progress.pop();
                        return Err(e);
                    }
                }
            }
            in_progress.pop();

            debug!(%target, conversion = entry.name, "converting");
            let value = entry
                .conversion
                .convert(Inputs::new(values), scope)
                .await
                .map_err(|e| {
                    if !entry.fallible {
                        warn!(
                            %target,
                            conversion = entry.name,
                            error = %e,
                            "infallible conversion failed"
                        );
                    }
                    ResolveError::from_conversion(target, entry.name, e)
                })?;

            if value.tag() != target {
                return Err(ResolveError::ConversionFailed {
                    target,
                    conversion: entry.name,
                    source: crate::value::ValueMismatch {
                        expected: target,
                        found: value.tag(),
                    }
                    .into(),
                });
            }

            bag.insert(value.clone());
            Ok(value)
        })
    }
}
