//! Remote terminal reached over a broker stream.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use protomap_broker::{Connection, StreamId};
use protomap_wire::{decode_frame, encode_frame};
use tokio::sync::Mutex;

use crate::error::{Result, UiError};
use crate::protocol::{Envelope, UiRequest, UiResponse};
use crate::types::{InputRequest, NamedValue, OutputStyle, Table};
use crate::Ui;

/// A [`Ui`] whose implementation lives on the other side of a stream.
///
/// Requests are sent one at a time; concurrent callers queue behind each
/// other. Every request carries an id, and replies to requests whose caller
/// gave up (a dropped future, a timeout) are skipped when they arrive.
#[derive(Debug)]
pub struct UiClient {
    conn: Connection,

    /// Held for the duration of one request/response round trip.
    in_flight: Mutex<()>,

    next_request: AtomicU64,
}

impl UiClient {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            in_flight: Mutex::new(()),
            next_request: AtomicU64::new(1),
        }
    }

    /// The stream this client talks over.
    pub fn stream_id(&self) -> StreamId {
        self.conn.id()
    }

    /// Stop talking to the remote terminal.
    ///
    /// The server side sees end-of-stream and finishes serving this
    /// connection. Safe to call more than once.
    pub fn close(&self) {
        tracing::debug!(stream_id = %self.conn.id(), "closing terminal client");
        self.conn.close();
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_closed()
    }

    async fn call(&self, request: UiRequest) -> Result<UiResponse> {
        if self.conn.is_closed() {
            return Err(UiError::Closed);
        }

        let _turn = self.in_flight.lock().await;
        let id = self.next_request.fetch_add(1, Ordering::Relaxed);
        let frame = encode_frame(&Envelope { id, body: request })?;
        self.conn.send(frame).await?;

        let reply = loop {
            let frame = self.conn.recv().await.ok_or(UiError::Closed)?;
            let reply: Envelope<UiResponse> = decode_frame(&frame)?;
            if reply.id == id {
                break reply.body;
            }
            tracing::debug!(
                stream_id = %self.conn.id(),
                stale = reply.id,
                "dropping reply to abandoned request"
            );
        };
        match reply {
            UiResponse::Error { message } => Err(UiError::Remote(message)),
            UiResponse::NonInteractive => Err(UiError::NonInteractive),
            response => Ok(response),
        }
    }

    async fn call_done(&self, request: UiRequest) -> Result<()> {
        let name = request.name();
        match self.call(request).await? {
            UiResponse::Done => Ok(()),
            _ => Err(UiError::UnexpectedResponse { request: name }),
        }
    }
}

#[async_trait]
impl Ui for UiClient {
    async fn interactive(&self) -> Result<bool> {
        match self.call(UiRequest::Interactive).await? {
            UiResponse::Interactive { interactive } => Ok(interactive),
            _ => Err(UiError::UnexpectedResponse {
                request: "interactive",
            }),
        }
    }

    async fn output(&self, msg: &str, style: OutputStyle) -> Result<()> {
        self.call_done(UiRequest::Output {
            msg: msg.to_string(),
            style,
        })
        .await
    }

    async fn named_values(&self, values: &[NamedValue]) -> Result<()> {
        self.call_done(UiRequest::NamedValues {
            values: values.to_vec(),
        })
        .await
    }

    async fn table(&self, table: &Table) -> Result<()> {
        self.call_done(UiRequest::Table {
            table: table.clone(),
        })
        .await
    }

    async fn input(&self, request: &InputRequest) -> Result<String> {
        match self
            .call(UiRequest::Input {
                request: request.clone(),
            })
            .await?
        {
            UiResponse::Input { value } => Ok(value),
            _ => Err(UiError::UnexpectedResponse { request: "input" }),
        }
    }
}
