//! Release actions collected during one call.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

type ReleaseAction = Box<dyn FnOnce() + Send>;

/// Ordered release actions owned by one call.
///
/// Actions run in reverse registration order when [`release`] is called or
/// the scope is dropped, whichever comes first. Each action runs exactly
/// once. A scope is never shared between calls.
///
/// [`release`]: CleanupScope::release
#[derive(Default)]
pub struct CleanupScope {
    actions: Mutex<Vec<ReleaseAction>>,
}

impl CleanupScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn actions(&self) -> MutexGuard<'_, Vec<ReleaseAction>> {
        self.actions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an action to run when the call ends.
    pub fn on_release(&self, action: impl FnOnce() + Send + 'static) {
        self.actions().push(Box::new(action));
    }

    /// Number of actions waiting to run.
    pub fn pending(&self) -> usize {
        self.actions().len()
    }

    /// Run every pending action, newest first. Returns how many ran.
    pub fn release(&self) -> usize {
        let actions = std::mem::take(&mut *self.actions());
        let count = actions.len();
        for action in actions.into_iter().rev() {
            action();
        }
        if count > 0 {
            trace!(count, "released call scope");
        }
        count
    }
}

impl Drop for CleanupScope {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for CleanupScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupScope")
            .field("pending", &self.pending())
            .finish()
    }
}
