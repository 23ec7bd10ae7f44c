//! Named loggers and the process-wide log root.
//!
//! Only a logger's name crosses the plugin boundary. Each side rebuilds a
//! logger from the name using its own [`LogRoot`], so log lines from a
//! plugin carry the name the host gave them.
//!
//! # Lifecycle
//!
//! The root is process-wide state. Call [`LogRoot::init`] once at startup,
//! before serving any call. It is never torn down. If nothing initializes
//! it, the first use creates a root named [`LogRoot::DEFAULT_NAME`].

use std::fmt;
use std::sync::{Arc, OnceLock};

static LOG_ROOT: OnceLock<LogRoot> = OnceLock::new();

/// A named handle that emits `tracing` events.
///
/// Every event carries the logger's name in a `logger` field.
#[derive(Clone, PartialEq, Eq)]
pub struct Logger {
    name: Arc<str>,
}

impl Logger {
    fn with_name(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A sub-logger: `parent.sub`, or just `sub` if this logger has no name.
    pub fn named(&self, sub: &str) -> Logger {
        if self.name.is_empty() {
            Logger::with_name(sub)
        } else {
            Logger::with_name(format!("{}.{}", self.name, sub))
        }
    }

    /// A logger with exactly `name`, discarding this logger's own name.
    pub fn reset_named(&self, name: &str) -> Logger {
        Logger::with_name(name)
    }

    pub fn trace(&self, msg: &str) {
        tracing::trace!(logger = %self.name, "{}", msg);
    }

    pub fn debug(&self, msg: &str) {
        tracing::debug!(logger = %self.name, "{}", msg);
    }

    pub fn info(&self, msg: &str) {
        tracing::info!(logger = %self.name, "{}", msg);
    }

    pub fn warn(&self, msg: &str) {
        tracing::warn!(logger = %self.name, "{}", msg);
    }

    pub fn error(&self, msg: &str) {
        tracing::error!(logger = %self.name, "{}", msg);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Logger").field(&self.name).finish()
    }
}

/// The process-wide default logger.
#[derive(Debug)]
pub struct LogRoot {
    root: Logger,
}

impl LogRoot {
    pub const DEFAULT_NAME: &'static str = "plugin";

    /// Install the process-wide root with the given name.
    ///
    /// The first call wins; later calls return the existing root unchanged.
    pub fn init(name: &str) -> &'static LogRoot {
        LOG_ROOT.get_or_init(|| LogRoot {
            root: Logger::with_name(name),
        })
    }

    /// The process-wide root.
    pub fn global() -> &'static LogRoot {
        Self::init(Self::DEFAULT_NAME)
    }

    /// Whether [`init`](Self::init) (or a first use) has happened.
    pub fn is_initialized() -> bool {
        LOG_ROOT.get().is_some()
    }

    pub fn logger(&self) -> Logger {
        self.root.clone()
    }

    /// A logger named `name`, derived from the root.
    pub fn reset_named(&self, name: &str) -> Logger {
        self.root.reset_named(name)
    }
}
