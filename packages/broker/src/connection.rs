//! Logical streams carried by a broker.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{BrokerError, Result};

/// Process-wide source of stream ids. Id 0 is never allocated.
static NEXT_STREAM_ID: AtomicU32 = AtomicU32::new(1);

/// Identifier of one multiplexed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(u32);

impl StreamId {
    /// Allocate a fresh id, distinct from every id allocated before it in
    /// this process.
    pub fn allocate() -> Self {
        Self(NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap an id received from the other side.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One end of a bidirectional stream of frames.
///
/// Frames written with [`send`](Self::send) arrive, in order, at the other
/// end's [`recv`](Self::recv). Closing either end makes the other end's
/// `recv` return `None` once buffered frames are drained.
pub struct Connection {
    id: StreamId,

    /// Sender half towards the peer. `None` once closed.
    tx: Mutex<Option<mpsc::Sender<Bytes>>>,

    /// Receiver half from the peer.
    rx: tokio::sync::Mutex<mpsc::Receiver<Bytes>>,

    /// Fires when the multiplexer carrying this stream goes away.
    transport: CancellationToken,
}

impl Connection {
    /// Create both ends of a stream.
    pub fn pair(id: StreamId, capacity: usize, transport: CancellationToken) -> (Self, Self) {
        let (tx1, rx1) = mpsc::channel(capacity);
        let (tx2, rx2) = mpsc::channel(capacity);

        let local = Self {
            id,
            tx: Mutex::new(Some(tx1)),
            rx: tokio::sync::Mutex::new(rx2),
            transport: transport.clone(),
        };

        let remote = Self {
            id,
            tx: Mutex::new(Some(tx2)),
            rx: tokio::sync::Mutex::new(rx1),
            transport,
        };

        (local, remote)
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    /// Send one frame to the peer.
    pub async fn send(&self, frame: Bytes) -> Result<()> {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(BrokerError::PeerClosed(self.id))?;

        tokio::select! {
            biased;
            _ = self.transport.cancelled() => Err(BrokerError::Closed),
            sent = tx.send(frame) => sent.map_err(|_| BrokerError::PeerClosed(self.id)),
        }
    }

    /// Receive the next frame, or `None` if the stream is finished.
    pub async fn recv(&self) -> Option<Bytes> {
        let mut rx = self.rx.lock().await;
        tokio::select! {
            biased;
            _ = self.transport.cancelled() => None,
            frame = rx.recv() => frame,
        }
    }

    /// Close our sending half. Calling this more than once is a no-op.
    pub fn close(&self) {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Whether this end has been closed locally or by transport teardown.
    pub fn is_closed(&self) -> bool {
        self.transport.is_cancelled()
            || self
                .tx
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_none()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}
