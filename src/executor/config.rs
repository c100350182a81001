use std::time::Duration;

/// What the watchdog does when a command outlives [`ExecutorConfig::command_timeout`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeoutAction {
    /// Report the stuck command and keep waiting for it.
    #[default]
    Warn,
    /// Report the stuck command and abandon it at its current await point.
    ///
    /// The start level stays at the last committed step.
    Abort,
}

/// Configuration for the command executor.
///
/// ## Sentinel values
/// - `command_timeout = 0s` → no watchdog
/// - `queue_capacity = 0` → clamped to 1
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// Capacity of the submission queue.
    ///
    /// When full, submissions fail with `SubmitError::Full` instead of waiting.
    pub queue_capacity: usize,

    /// Longest a single command may run before the watchdog fires.
    pub command_timeout: Duration,

    /// Watchdog reaction.
    pub on_timeout: TimeoutAction,
}

impl ExecutorConfig {
    /// Returns the watchdog timeout as an `Option` (`None` = disabled).
    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        if self.command_timeout == Duration::ZERO {
            None
        } else {
            Some(self.command_timeout)
        }
    }

    /// Returns a queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for ExecutorConfig {
    /// Default configuration:
    ///
    /// - `queue_capacity = 64`
    /// - `command_timeout = 5min`
    /// - `on_timeout = TimeoutAction::Warn`
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            command_timeout: Duration::from_secs(5 * 60),
            on_timeout: TimeoutAction::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sentinels() {
        let cfg = ExecutorConfig {
            queue_capacity: 0,
            command_timeout: Duration::ZERO,
            on_timeout: TimeoutAction::Abort,
        };
        assert_eq!(cfg.timeout(), None);
        assert_eq!(cfg.queue_capacity_clamped(), 1);
        assert_eq!(
            ExecutorConfig::default().timeout(),
            Some(Duration::from_secs(300))
        );
    }
}
