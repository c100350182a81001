//! # LogWriter: event renderer
//!
//! A minimal subscriber that renders incoming [`Event`]s through `tracing`.
//! Use it for tests or demos; install a `tracing` subscriber to see output.
//!
//! ## Example output
//! ```text
//! [queued] target=3 listeners=1
//! [started] from=0 target=3
//! [changing] 0 -> 1
//! [changed] 0 -> 1
//! [completed] level=3
//! [failed] level=2 target=5 err="framework failed while changing 2 -> 3: ..."
//! [timed-out] target=5 timeout_ms=300000
//! [stopped] dropped=0
//! ```

use async_trait::async_trait;
use tracing::{info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let from = e.from.map(|l| l.get());
        let to = e.to.map(|l| l.get());
        let target = e.target.map(|l| l.get());

        match e.kind {
            EventKind::TransitionQueued => {
                info!("[queued] target={target:?} listeners={:?}", e.listeners);
            }
            EventKind::CommandDropped => {
                warn!("[dropped] target={target:?}");
            }
            EventKind::TransitionStarted => {
                info!("[started] from={from:?} target={target:?}");
            }
            EventKind::LevelChanging => {
                info!("[changing] {from:?} -> {to:?}");
            }
            EventKind::LevelChanged => {
                info!("[changed] {from:?} -> {to:?}");
            }
            EventKind::TransitionCompleted => {
                info!("[completed] level={to:?}");
            }
            EventKind::TransitionFailed => {
                warn!(
                    "[failed] level={to:?} target={target:?} err={:?}",
                    e.reason.as_deref()
                );
            }
            EventKind::CommandTimedOut => {
                warn!("[timed-out] target={target:?} timeout_ms={:?}", e.timeout_ms);
            }
            EventKind::ShutdownRequested => {
                info!("[shutdown-requested]");
            }
            EventKind::ExecutorStopped => {
                info!("[stopped] dropped={:?}", e.dropped);
            }
            EventKind::InitialLevelChanged => {
                info!("[initial-level] {from:?} -> {to:?}");
            }
            EventKind::SubscriberOverflow => {
                warn!(
                    "[subscriber-overflow] subscriber={:?} reason={:?}",
                    e.source.as_deref(),
                    e.reason.as_deref()
                );
            }
            EventKind::SubscriberPanicked => {
                warn!(
                    "[subscriber-panicked] subscriber={} info={}",
                    e.source.as_deref().unwrap_or("unknown"),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
