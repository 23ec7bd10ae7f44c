//! Handle to plugin runtime internals.

use std::sync::Arc;

use protomap_broker::Broker;

/// Ambient access to what conversions need beyond their inputs.
///
/// Today that is the stream broker shared by everything on one plugin
/// connection. The broker is internally synchronized; any number of calls
/// may use it at once.
#[derive(Debug, Clone)]
pub struct Internal {
    broker: Arc<dyn Broker>,
}

impl Internal {
    pub fn new(broker: Arc<dyn Broker>) -> Self {
        Self { broker }
    }

    pub fn broker(&self) -> &Arc<dyn Broker> {
        &self.broker
    }
}
