//! # Completion listeners and their fan-out.
//!
//! A transition request carries an ordered set of [`FrameworkListener`]s.
//! The same set is handed to every framework callback made for that request;
//! the framework delivers [`FrameworkEvent`]s to it through [`Listeners::fire`].
//!
//! ## Rules
//! - Listeners are called synchronously, in insertion order.
//! - Each call is guarded: a panicking listener is logged and skipped, the
//!   rest of the set still runs.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::warn;

use crate::level::Level;
use crate::subscribers::panic_message;

/// Kind of framework notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkEventKind {
    /// The framework reached a new start level.
    StartLevelChanged,
    /// The framework hit an error it wants listeners to know about.
    Error,
}

/// Notification delivered to [`FrameworkListener`]s.
#[derive(Debug, Clone)]
pub struct FrameworkEvent {
    /// What happened.
    pub kind: FrameworkEventKind,
    /// The start level the notification refers to.
    pub level: Level,
    /// Error description for [`FrameworkEventKind::Error`].
    pub reason: Option<Arc<str>>,
}

impl FrameworkEvent {
    /// A `StartLevelChanged` notification.
    pub fn start_level_changed(level: Level) -> Self {
        Self {
            kind: FrameworkEventKind::StartLevelChanged,
            level,
            reason: None,
        }
    }

    /// An `Error` notification.
    pub fn error(level: Level, reason: impl Into<Arc<str>>) -> Self {
        Self {
            kind: FrameworkEventKind::Error,
            level,
            reason: Some(reason.into()),
        }
    }
}

/// Caller-supplied completion callback.
///
/// Closures `Fn(&FrameworkEvent)` implement this trait directly.
pub trait FrameworkListener: Send + Sync + 'static {
    /// Receives one notification.
    fn framework_event(&self, event: &FrameworkEvent);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> FrameworkListener for F
where
    F: Fn(&FrameworkEvent) + Send + Sync + 'static,
{
    fn framework_event(&self, event: &FrameworkEvent) {
        self(event)
    }
}

/// Outcome of one [`Listeners::fire`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOut {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Listeners that panicked.
    pub panicked: usize,
}

/// Ordered, immutable listener set attached to one transition request.
///
/// Cheap to clone (shared slice).
#[derive(Clone, Default)]
pub struct Listeners {
    inner: Arc<[Arc<dyn FrameworkListener>]>,
}

impl Listeners {
    /// Builds a set preserving iteration order.
    pub fn new(listeners: impl IntoIterator<Item = Arc<dyn FrameworkListener>>) -> Self {
        Self {
            inner: listeners.into_iter().collect(),
        }
    }

    /// An empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn FrameworkListener>> {
        self.inner.iter()
    }

    /// Delivers `event` to every listener in order, isolating panics.
    pub fn fire(&self, event: &FrameworkEvent) -> FanOut {
        let mut out = FanOut::default();
        for listener in self.inner.iter() {
            match catch_unwind(AssertUnwindSafe(|| listener.framework_event(event))) {
                Ok(()) => out.delivered += 1,
                Err(payload) => {
                    out.panicked += 1;
                    warn!(
                        listener = listener.name(),
                        level = event.level.get(),
                        info = %panic_message(payload.as_ref()),
                        "framework listener panicked"
                    );
                }
            }
        }
        out
    }
}

impl FromIterator<Arc<dyn FrameworkListener>> for Listeners {
    fn from_iter<I: IntoIterator<Item = Arc<dyn FrameworkListener>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.iter().map(|l| l.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Faulty;

    impl FrameworkListener for Faulty {
        fn framework_event(&self, _event: &FrameworkEvent) {
            panic!("listener failure");
        }
    }

    #[test]
    fn fires_in_insertion_order_past_a_panicking_listener() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&log);
        let third = Arc::clone(&log);

        let items: [Arc<dyn FrameworkListener>; 3] = [
            Arc::new(move |ev: &FrameworkEvent| first.lock().push(("first", ev.level))),
            Arc::new(Faulty),
            Arc::new(move |ev: &FrameworkEvent| third.lock().push(("third", ev.level))),
        ];
        let listeners = Listeners::new(items);

        let out = listeners.fire(&FrameworkEvent::start_level_changed(Level::new(4)));
        assert_eq!(out, FanOut { delivered: 2, panicked: 1 });
        assert_eq!(
            *log.lock(),
            vec![("first", Level::new(4)), ("third", Level::new(4))]
        );
    }

    #[test]
    fn empty_set_delivers_nothing() {
        let out = Listeners::empty().fire(&FrameworkEvent::error(Level::ZERO, "nope"));
        assert_eq!(out, FanOut::default());
    }
}
