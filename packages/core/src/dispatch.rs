//! One inbound call, from wire arguments to wire reply.

use std::error::Error as StdError;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::bag::{Ambient, ArgumentBag};
use crate::error::ResolveError;
use crate::resolver::Resolver;
use crate::scope::CleanupScope;
use crate::value::{TypeTag, Value, ValueMismatch};

/// Error returned by plugin code.
pub type EntryError = Box<dyn StdError + Send + Sync>;

/// What an entry point takes and returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: &'static str,
    /// Argument types, in the order the entry point receives them.
    pub inputs: Vec<TypeTag>,
    /// Type of the value the entry point returns, if any.
    pub output: Option<TypeTag>,
    /// Wire type the returned value is sent back as.
    pub reply: Option<TypeTag>,
}

impl Signature {
    pub fn new(name: &'static str, inputs: impl Into<Vec<TypeTag>>) -> Self {
        Self {
            name,
            inputs: inputs.into(),
            output: None,
            reply: None,
        }
    }

    /// Declare that the entry point returns `output`, sent back as `reply`.
    pub fn returning(mut self, output: TypeTag, reply: TypeTag) -> Self {
        self.output = Some(output);
        self.reply = Some(reply);
        self
    }
}

/// A plugin function callable across the boundary.
#[async_trait]
pub trait EntryPoint: Send + Sync {
    fn signature(&self) -> &Signature;

    /// Called with one value per declared input, in declaration order.
    async fn call(&self, args: Vec<Value>) -> Result<Option<Value>, EntryError>;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("argument for {entry}: {source}")]
    Argument {
        entry: &'static str,
        #[source]
        source: ResolveError,
    },

    #[error("{entry} failed: {source}")]
    Failed {
        entry: &'static str,
        #[source]
        source: EntryError,
    },

    #[error("{entry} returned the wrong result: {source}")]
    Result {
        entry: &'static str,
        #[source]
        source: ValueMismatch,
    },

    #[error("{entry} returned no result")]
    MissingResult { entry: &'static str },

    #[error("reply for {entry}: {source}")]
    Reply {
        entry: &'static str,
        #[source]
        source: ResolveError,
    },
}

/// Runs entry points with resolved arguments.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    resolver: Resolver,
}

impl Dispatcher {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Serve one call.
    ///
    /// Resolves every declared input from `ambient` and `args`, calls
    /// `entry`, and maps its result to the declared reply type. The call's
    /// cleanup scope is released before this returns, whatever the outcome.
    pub async fn dispatch(
        &self,
        entry: &dyn EntryPoint,
        ambient: Ambient,
        args: Vec<Value>,
    ) -> Result<Option<Value>, DispatchError> {
        let scope = CleanupScope::new();
        let result = self.dispatch_in(entry, ambient, args, &scope).await;
        let released = scope.release();
        let name = entry.signature().name;
        match &result {
            Ok(_) => debug!(entry = name, released, "call complete"),
            Err(e) => warn!(entry = name, released, error = %e, "call failed"),
        }
        result
    }

    async fn dispatch_in(
        &self,
        entry: &dyn EntryPoint,
        ambient: Ambient,
        args: Vec<Value>,
        scope: &CleanupScope,
    ) -> Result<Option<Value>, DispatchError> {
        let signature = entry.signature();
        let name = signature.name;
        let mut bag = ArgumentBag::new(ambient.clone()).with_args(args);

        let mut values = Vec::with_capacity(signature.inputs.len());
        for &input in &signature.inputs {
            let value = self
                .resolver
                .resolve(input, &mut bag, scope)
                .await
                .map_err(|source| DispatchError::Argument { entry: name, source })?;
            values.push(value);
        }

        let result = entry
            .call(values)
            .await
            .map_err(|source| DispatchError::Failed { entry: name, source })?;

        let (output, reply) = match (signature.output, signature.reply) {
            (Some(output), Some(reply)) => (output, reply),
            _ => return Ok(None),
        };
        let result = result.ok_or(DispatchError::MissingResult { entry: name })?;
        if result.tag() != output {
            return Err(DispatchError::Result {
                entry: name,
                source: ValueMismatch {
                    expected: output,
                    found: result.tag(),
                },
            });
        }

        // The reply comes from the result alone, never from the arguments.
        let mut reply_bag = ArgumentBag::new(ambient);
        reply_bag.insert(result);
        let reply = self
            .resolver
            .resolve(reply, &mut reply_bag, scope)
            .await
            .map_err(|source| DispatchError::Reply { entry: name, source })?;
        Ok(Some(reply))
    }
}
