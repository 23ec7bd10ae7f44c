//! In-process broker.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::connection::{Connection, StreamId};
use crate::error::{BrokerError, Result};
use crate::{Broker, StreamServer};

/// Configuration for a [`MemoryBroker`].
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// How long `dial` waits for the other side to start serving an id.
    pub dial_timeout: Duration,

    /// Dialed connections queued per id before the accept loop picks them up.
    pub accept_backlog: usize,

    /// Frames buffered in each direction of a connection.
    pub stream_capacity: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            dial_timeout: Duration::from_secs(5),
            accept_backlog: 16,
            stream_capacity: 64,
        }
    }
}

/// State shared by every clone of a [`MemoryBroker`].
#[derive(Debug)]
struct Hub {
    config: BrokerConfig,

    /// Ids currently being served, each with the queue its accept loop reads.
    listeners: Mutex<HashMap<StreamId, mpsc::Sender<Connection>>>,

    /// Wakes pending dials when a listener appears.
    listener_added: Notify,

    /// Cancelled when the multiplexer goes away.
    transport: CancellationToken,
}

impl Hub {
    fn listener(&self, id: StreamId) -> Option<mpsc::Sender<Connection>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn add_listener(&self, id: StreamId, queue: mpsc::Sender<Connection>) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, queue);
        self.listener_added.notify_waiters();
    }

    fn remove_listener(&self, id: StreamId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

/// A broker whose two sides live in the same process.
///
/// Clones share the same hub: an id served through one clone can be dialed
/// through any other. Both ends of a plugin boundary can therefore be
/// exercised without a real transport.
#[derive(Debug, Clone)]
pub struct MemoryBroker {
    hub: Arc<Hub>,
}

impl MemoryBroker {
    pub fn new(config: BrokerConfig) -> Self {
        Self {
            hub: Arc::new(Hub {
                config,
                listeners: Mutex::new(HashMap::new()),
                listener_added: Notify::new(),
                transport: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.hub.config
    }

    /// Whether `id` currently has an accept loop.
    pub fn is_serving(&self, id: StreamId) -> bool {
        self.hub.listener(id).is_some()
    }

    /// Number of ids currently being served.
    pub fn serving_count(&self) -> usize {
        self.hub
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Tear down the multiplexer.
    ///
    /// Accept loops exit, open connections see end-of-stream, and pending
    /// or future dials fail with [`BrokerError::Closed`].
    pub fn shutdown(&self) {
        debug!("broker shutting down");
        self.hub.transport.cancel();
        self.hub
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn is_shut_down(&self) -> bool {
        self.hub.transport.is_cancelled()
    }
}

impl Default for MemoryBroker {
    fn default() -> Self {
        Self::new(BrokerConfig::default())
    }
}

#[async_trait]
impl Broker for MemoryBroker {
    fn next_id(&self) -> StreamId {
        StreamId::allocate()
    }

    async fn dial(&self, cancel: &CancellationToken, id: StreamId) -> Result<Connection> {
        let hub = &self.hub;
        let deadline = Instant::now() + hub.config.dial_timeout;

        loop {
            // Register interest before looking, so a listener added in
            // between still wakes us.
            let listener_added = hub.listener_added.notified();

            if hub.transport.is_cancelled() {
                return Err(BrokerError::Closed);
            }
            if cancel.is_cancelled() {
                return Err(BrokerError::Cancelled(id));
            }

            if let Some(queue) = hub.listener(id) {
                let (local, remote) =
                    Connection::pair(id, hub.config.stream_capacity, hub.transport.clone());
                queue
                    .send(remote)
                    .await
                    .map_err(|_| BrokerError::PeerClosed(id))?;
                debug!(stream_id = %id, "dialed stream");
                return Ok(local);
            }

            tokio::select! {
                _ = listener_added => {}
                _ = cancel.cancelled() => return Err(BrokerError::Cancelled(id)),
                _ = hub.transport.cancelled() => return Err(BrokerError::Closed),
                _ = tokio::time::sleep_until(deadline) => {
                    return Err(BrokerError::Timeout {
                        id,
                        timeout: hub.config.dial_timeout,
                    });
                }
            }
        }
    }

    fn accept_and_serve(&self, id: StreamId, server: Arc<dyn StreamServer>) -> JoinHandle<()> {
        let (queue, mut accepted) = mpsc::channel(self.hub.config.accept_backlog.max(1));
        self.hub.add_listener(id, queue);
        debug!(stream_id = %id, "serving stream");

        let hub = Arc::clone(&self.hub);
        tokio::spawn(async move {
            loop {
                let conn = tokio::select! {
                    conn = accepted.recv() => conn,
                    _ = hub.transport.cancelled() => None,
                };
                let Some(conn) = conn else {
                    break;
                };

                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(e) = server.serve(conn).await {
                        warn!(stream_id = %id, error = %e, "stream server failed");
                    }
                });
            }

            hub.remove_listener(id);
            debug!(stream_id = %id, "stopped serving stream");
        })
    }
}
