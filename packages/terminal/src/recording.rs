//! In-memory terminal.
//!
//! Records everything written to it and answers prompts from a queue. Hosts
//! use it when there is no real terminal (batch jobs, tests), and tests use
//! it to check exactly what a plugin printed.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{Result, UiError};
use crate::types::{InputRequest, NamedValue, OutputStyle, Table};
use crate::Ui;

/// Something written to a [`RecordingUi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Output { msg: String, style: OutputStyle },
    NamedValues(Vec<NamedValue>),
    Table(Table),
    Input { prompt: String },
}

#[derive(Debug, Default)]
struct State {
    events: Vec<UiEvent>,
    answers: VecDeque<String>,
}

/// A terminal backed by memory.
#[derive(Debug, Default)]
pub struct RecordingUi {
    interactive: bool,
    state: Mutex<State>,
}

impl RecordingUi {
    /// A terminal that cannot answer prompts.
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal that answers prompts with `answers`, in order.
    pub fn interactive<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interactive: true,
            state: Mutex::new(State {
                events: Vec::new(),
                answers: answers.into_iter().map(Into::into).collect(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<UiEvent> {
        self.state().events.clone()
    }

    /// Text of every output line, in order.
    pub fn output_lines(&self) -> Vec<String> {
        self.state()
            .events
            .iter()
            .filter_map(|event| match event {
                UiEvent::Output { msg, .. } => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: UiEvent) {
        self.state().events.push(event);
    }
}

#[async_trait]
impl Ui for RecordingUi {
    async fn interactive(&self) -> Result<bool> {
        Ok(self.interactive)
    }

    async fn output(&self, msg: &str, style: OutputStyle) -> Result<()> {
        self.record(UiEvent::Output {
            msg: msg.to_string(),
            style,
        });
        Ok(())
    }

    async fn named_values(&self, values: &[NamedValue]) -> Result<()> {
        self.record(UiEvent::NamedValues(values.to_vec()));
        Ok(())
    }

    async fn table(&self, table: &Table) -> Result<()> {
        self.record(UiEvent::Table(table.clone()));
        Ok(())
    }

    async fn input(&self, request: &InputRequest) -> Result<String> {
        if !self.interactive {
            return Err(UiError::NonInteractive);
        }

        let mut state = self.state();
        state.events.push(UiEvent::Input {
            prompt: request.prompt.clone(),
        });
        state
            .answers
            .pop_front()
            .ok_or_else(|| UiError::Remote(format!("no answer queued for {:?}", request.prompt)))
    }
}
