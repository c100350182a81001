//! # Runtime events emitted by the sequencer and its executor.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Submission events**: requests entering or leaving the queue
//! - **Transition events**: the level walk (started, each step, completed, failed)
//! - **Executor events**: watchdog and shutdown
//! - **Subscriber events**: fan-out health
//!
//! The [`Event`] struct carries metadata such as timestamps, levels, reasons,
//! and timeouts.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use levelvisor::{Event, EventKind, Level};
//!
//! let ev = Event::new(EventKind::LevelChanging)
//!     .with_from(Level::new(2))
//!     .with_to(Level::new(3))
//!     .with_target(Level::new(5));
//!
//! assert_eq!(ev.kind, EventKind::LevelChanging);
//! assert_eq!(ev.to, Some(Level::new(3)));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::level::Level;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Submission events ===
    /// A transition request was accepted into the queue.
    ///
    /// Sets:
    /// - `target`: requested level
    /// - `listeners`: number of listeners attached
    TransitionQueued,

    /// A queued request was discarded because the executor shut down.
    ///
    /// Sets:
    /// - `target`: requested level
    CommandDropped,

    // === Transition events ===
    /// The worker dequeued a request and begins walking.
    ///
    /// Sets:
    /// - `from`: level at the time the walk begins
    /// - `target`: requested level
    TransitionStarted,

    /// About to call `level_changing` for one step.
    ///
    /// Sets:
    /// - `from` / `to`: the step
    /// - `target`: requested level
    LevelChanging,

    /// `level_changed` returned for one step; the level is committed.
    ///
    /// Sets:
    /// - `from` / `to`: the step
    /// - `target`: requested level
    LevelChanged,

    /// The walk reached the requested level.
    ///
    /// Sets:
    /// - `to`: final level
    /// - `target`: requested level
    TransitionCompleted,

    /// The walk stopped early.
    ///
    /// Sets:
    /// - `to`: level the sequencer was left at
    /// - `target`: requested level
    /// - `reason`: error message
    TransitionFailed,

    // === Executor events ===
    /// A command ran longer than the configured timeout.
    ///
    /// Sets:
    /// - `target`: requested level
    /// - `timeout_ms`: configured command timeout
    CommandTimedOut,

    /// `shutdown_now` was called.
    ShutdownRequested,

    /// The worker exited.
    ///
    /// Sets:
    /// - `dropped`: number of queued commands discarded
    ExecutorStopped,

    /// The initial level for newly admitted components changed.
    ///
    /// Sets:
    /// - `from` / `to`: previous and new value
    InitialLevelChanged,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Level before the step (or at walk start).
    pub from: Option<Level>,
    /// Level after the step (or where the walk ended).
    pub to: Option<Level>,
    /// Level requested by the command this event belongs to.
    pub target: Option<Level>,
    /// Number of listeners attached to the command.
    pub listeners: Option<u32>,
    /// Number of commands discarded at shutdown.
    pub dropped: Option<u32>,
    /// Command timeout in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Name of the emitting component, if not the sequencer itself.
    pub source: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            from: None,
            to: None,
            target: None,
            listeners: None,
            dropped: None,
            timeout_ms: None,
            reason: None,
            source: None,
        }
    }

    #[inline]
    pub fn with_from(mut self, level: Level) -> Self {
        self.from = Some(level);
        self
    }

    #[inline]
    pub fn with_to(mut self, level: Level) -> Self {
        self.to = Some(level);
        self
    }

    #[inline]
    pub fn with_target(mut self, level: Level) -> Self {
        self.target = Some(level);
        self
    }

    /// Attaches a listener count.
    #[inline]
    pub fn with_listeners(mut self, n: usize) -> Self {
        self.listeners = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a dropped-command count.
    #[inline]
    pub fn with_dropped(mut self, n: usize) -> Self {
        self.dropped = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a timeout duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the emitting component name.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_source(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_source(subscriber)
            .with_reason(info)
    }

    /// True for events that end a transition (completed or failed).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TransitionCompleted | EventKind::TransitionFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::new(EventKind::ShutdownRequested);
        let b = Event::new(EventKind::ShutdownRequested);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn counts_saturate() {
        let ev = Event::new(EventKind::ExecutorStopped).with_dropped(usize::MAX);
        assert_eq!(ev.dropped, Some(u32::MAX));
    }

    #[test]
    fn terminal_kinds() {
        assert!(Event::new(EventKind::TransitionCompleted).is_terminal());
        assert!(Event::new(EventKind::TransitionFailed).is_terminal());
        assert!(!Event::new(EventKind::LevelChanged).is_terminal());
    }
}
