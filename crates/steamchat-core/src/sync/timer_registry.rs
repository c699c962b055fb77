use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// Recurring timers owned by one window.
///
/// Cancelled as a set by [`TimerRegistry::cancel_all`] or on drop, so no
/// timer outlives the window it polls.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl TimerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `timer` on the current `LocalSet` and register it.
    ///
    /// Must be called from within a [`LocalSet`](tokio::task::LocalSet).
    pub fn spawn(&mut self, name: &'static str, timer: impl Future<Output = ()> + 'static) {
        let handle = tokio::task::spawn_local(timer);
        debug!(timer = name, "Timer started");
        self.handles.push((name, handle));
    }

    /// Registered timers.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no timer is registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Registered timers that have not finished.
    pub fn active(&self) -> usize {
        self.handles
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }

    /// Abort every registered timer.
    pub fn cancel_all(&mut self) {
        for (name, handle) in self.handles.drain(..) {
            handle.abort();
            debug!(timer = name, "Timer cancelled");
        }
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
