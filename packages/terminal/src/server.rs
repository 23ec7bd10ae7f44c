//! Serving a local terminal to a remote client.

use std::sync::Arc;

use async_trait::async_trait;
use protomap_broker::{Connection, ServeError, StreamServer};
use protomap_wire::{decode_frame, encode_frame};
use tracing::{debug, warn};

use crate::error::UiError;
use crate::protocol::{Envelope, EnvelopeId, UiRequest, UiResponse};
use crate::Ui;

/// Serves a local [`Ui`] to [`UiClient`](crate::UiClient)s.
///
/// Each accepted connection is handled until the client closes it. Errors
/// from the wrapped implementation are sent back to the client rather than
/// ending the connection.
#[derive(Clone)]
pub struct UiServer {
    ui: Arc<dyn Ui>,
}

impl UiServer {
    pub fn new(ui: Arc<dyn Ui>) -> Self {
        Self { ui }
    }

    async fn handle(&self, request: UiRequest) -> UiResponse {
        let result = match request {
            UiRequest::Interactive => self
                .ui
                .interactive()
                .await
                .map(|interactive| UiResponse::Interactive { interactive }),
            UiRequest::Output { msg, style } => {
                self.ui.output(&msg, style).await.map(|()| UiResponse::Done)
            }
            UiRequest::NamedValues { values } => self
                .ui
                .named_values(&values)
                .await
                .map(|()| UiResponse::Done),
            UiRequest::Table { table } => self.ui.table(&table).await.map(|()| UiResponse::Done),
            UiRequest::Input { request } => self
                .ui
                .input(&request)
                .await
                .map(|value| UiResponse::Input { value }),
        };

        match result {
            Ok(response) => response,
            Err(UiError::NonInteractive) => UiResponse::NonInteractive,
            Err(e) => UiResponse::Error {
                message: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl StreamServer for UiServer {
    async fn serve(&self, conn: Connection) -> Result<(), ServeError> {
        debug!(stream_id = %conn.id(), "terminal client connected");

        while let Some(frame) = conn.recv().await {
            let response = match decode_frame::<Envelope<UiRequest>>(&frame) {
                Ok(request) => Envelope {
                    id: request.id,
                    body: self.handle(request.body).await,
                },
                Err(e) => {
                    warn!(stream_id = %conn.id(), error = %e, "malformed terminal request");
                    let id = decode_frame::<EnvelopeId>(&frame)
                        .unwrap_or_default()
                        .id;
                    Envelope {
                        id,
                        body: UiResponse::Error {
                            message: e.to_string(),
                        },
                    }
                }
            };
            conn.send(encode_frame(&response)?).await?;
        }

        debug!(stream_id = %conn.id(), "terminal client disconnected");
        Ok(())
    }
}
