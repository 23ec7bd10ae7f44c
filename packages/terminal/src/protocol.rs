//! Frames exchanged between a [`UiClient`](crate::UiClient) and a
//! [`UiServer`](crate::UiServer).
//!
//! Each request gets exactly one response, in order. Both travel inside an
//! [`Envelope`] carrying the request's id, so a client can drop replies to
//! requests it gave up on.

use serde::{Deserialize, Serialize};

use crate::types::{InputRequest, NamedValue, OutputStyle, Table};

/// A request or response with the id pairing them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub id: u64,
    #[serde(flatten)]
    pub body: T,
}

/// The id of a frame whose body didn't decode.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EnvelopeId {
    #[serde(default)]
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiRequest {
    Interactive,
    Output { msg: String, style: OutputStyle },
    NamedValues { values: Vec<NamedValue> },
    Table { table: Table },
    Input { request: InputRequest },
}

impl UiRequest {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            UiRequest::Interactive => "interactive",
            UiRequest::Output { .. } => "output",
            UiRequest::NamedValues { .. } => "named_values",
            UiRequest::Table { .. } => "table",
            UiRequest::Input { .. } => "input",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum UiResponse {
    Done,
    Interactive { interactive: bool },
    Input { value: String },
    NonInteractive,
    Error { message: String },
}
