//! Terminal UI for plugins.
//!
//! A [`Ui`] is how a component talks to the person running it: plain output,
//! name/value summaries, tables, and prompts for input. The real terminal
//! lives with the host. A plugin gets a [`UiClient`] that forwards every call
//! over a broker stream to a [`UiServer`] wrapping the host's implementation.
//! Either side can hold a `dyn Ui` without knowing which one it has.

mod client;
mod error;
mod protocol;
mod recording;
mod server;
mod types;

use async_trait::async_trait;

pub use client::UiClient;
pub use error::{Result, UiError};
pub use protocol::{Envelope, UiRequest, UiResponse};
pub use recording::{RecordingUi, UiEvent};
pub use server::UiServer;
pub use types::{InputRequest, NamedValue, OutputStyle, Table};

/// An interactive terminal.
#[async_trait]
pub trait Ui: Send + Sync {
    /// Whether the terminal can answer [`input`](Self::input) prompts.
    async fn interactive(&self) -> Result<bool>;

    /// Print one message.
    async fn output(&self, msg: &str, style: OutputStyle) -> Result<()>;

    /// Print aligned name/value pairs.
    async fn named_values(&self, values: &[NamedValue]) -> Result<()>;

    /// Print a table.
    async fn table(&self, table: &Table) -> Result<()>;

    /// Ask the user for a line of input.
    ///
    /// Fails with [`UiError::NonInteractive`] if nobody can answer.
    async fn input(&self, request: &InputRequest) -> Result<String>;
}
