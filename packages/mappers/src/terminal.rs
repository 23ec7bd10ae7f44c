//! Terminals across the boundary.
//!
//! A terminal can't be serialized. Instead the side that owns it serves it
//! on a broker stream and sends only the stream id:
//!
//! - [`terminal_ui_proto`] (producer): allocate an id, start a [`UiServer`]
//!   on it, and return an [`ArgsTerminalUi`] carrying the id. The server
//!   belongs to the broker, not to the call, and keeps running after the
//!   call returns so the other side can keep using the terminal.
//! - [`terminal_ui`] (consumer): dial the id from an [`ArgsTerminalUi`] and
//!   wrap the connection in a [`UiClient`]. The client is closed when the
//!   call's scope is released.

use std::sync::Arc;

use async_trait::async_trait;
use protomap_broker::StreamId;
use protomap_core::{
    CallContext, CleanupScope, Conversion, ConversionEntry, ConversionError, Inputs, Internal,
    Logger, TerminalUi, TypeTag, Value,
};
use protomap_terminal::{UiClient, UiServer};
use protomap_wire::ArgsTerminalUi;

struct Dial;

#[async_trait]
impl Conversion for Dial {
    async fn convert(
        &self,
        mut inputs: Inputs,
        scope: &CleanupScope,
    ) -> Result<Value, ConversionError> {
        let ctx: CallContext = inputs.take()?;
        let args: ArgsTerminalUi = inputs.take()?;
        let log: Logger = inputs.take()?;
        let internal: Internal = inputs.take()?;

        let id = StreamId::from_raw(args.stream_id);
        let conn = ctx.run(internal.broker().dial(ctx.token(), id)).await??;

        let client = Arc::new(UiClient::new(conn));
        let closer = client.clone();
        scope.on_release(move || closer.close());
        log.debug(&format!("terminal connected on stream {}", id));

        Ok(TerminalUi::new(client).into())
    }
}

struct Serve;

#[async_trait]
impl Conversion for Serve {
    async fn convert(
        &self,
        mut inputs: Inputs,
        _scope: &CleanupScope,
    ) -> Result<Value, ConversionError> {
        let ui: TerminalUi = inputs.take()?;
        let log: Logger = inputs.take()?;
        let internal: Internal = inputs.take()?;

        let broker = internal.broker();
        let id = broker.next_id();
        let server = Arc::new(UiServer::new(ui.into_inner()));
        // Detached: the server outlives this call.
        drop(broker.accept_and_serve(id, server));
        log.debug(&format!("serving terminal on stream {}", id));

        Ok(ArgsTerminalUi {
            stream_id: id.as_raw(),
        }
        .into())
    }
}

/// Consumer side: dial the stream named in an [`ArgsTerminalUi`].
///
/// Fails with a transport error if the stream can't be opened before the
/// call is cancelled or the broker gives up waiting. Nothing is registered
/// on the scope in that case.
pub fn terminal_ui() -> ConversionEntry {
    ConversionEntry::new(
        "terminal_ui",
        [
            TypeTag::Context,
            TypeTag::ArgsTerminalUi,
            TypeTag::Logger,
            TypeTag::Internal,
        ],
        TypeTag::TerminalUi,
        Dial,
    )
}

/// Producer side: serve a terminal and describe it as an [`ArgsTerminalUi`].
pub fn terminal_ui_proto() -> ConversionEntry {
    ConversionEntry::new(
        "terminal_ui_proto",
        [TypeTag::TerminalUi, TypeTag::Logger, TypeTag::Internal],
        TypeTag::ArgsTerminalUi,
        Serve,
    )
    .infallible()
}
