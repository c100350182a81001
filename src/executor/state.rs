use std::time::Instant;

use crate::level::Level;

/// Lifecycle of the executor worker.
///
/// ```text
/// Idle ──dequeue──► Running ──done──► Idle
///   └──────── shutdown_now() ────────► ShuttingDown ──worker exits──► Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    /// Waiting for a command.
    Idle,

    /// A transition is in progress.
    Running {
        /// The level the running command asked for.
        target: Level,
        /// When the worker dequeued it.
        started_at: Instant,
    },

    /// Shutdown requested; the in-flight command (if any) is finishing.
    ShuttingDown,

    /// The worker has exited.
    Stopped,
}

impl ExecutorState {
    /// True once shutdown has been requested.
    pub fn is_shut_down(&self) -> bool {
        matches!(self, ExecutorState::ShuttingDown | ExecutorState::Stopped)
    }

    /// Idle → Running; other states are kept.
    pub(crate) fn begin(&mut self, target: Level) {
        if *self == ExecutorState::Idle {
            *self = ExecutorState::Running {
                target,
                started_at: Instant::now(),
            };
        }
    }

    /// Running → Idle; other states are kept.
    pub(crate) fn finish(&mut self) {
        if matches!(self, ExecutorState::Running { .. }) {
            *self = ExecutorState::Idle;
        }
    }

    /// Any live state → ShuttingDown. Returns `false` if shutdown was already requested.
    pub(crate) fn request_shutdown(&mut self) -> bool {
        if self.is_shut_down() {
            return false;
        }
        *self = ExecutorState::ShuttingDown;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_is_sticky() {
        let mut st = ExecutorState::Idle;
        st.begin(Level::new(2));
        assert!(matches!(st, ExecutorState::Running { .. }));

        assert!(st.request_shutdown());
        assert!(!st.request_shutdown());

        st.finish();
        assert_eq!(st, ExecutorState::ShuttingDown);
        st.begin(Level::new(3));
        assert_eq!(st, ExecutorState::ShuttingDown);
    }
}
