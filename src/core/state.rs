//! # Shared start-level state.
//!
//! Both values sit behind one lock. The lock is held only to read or write a
//! value; it is never held across a framework callback (the guard is `!Send`,
//! so it cannot live across an `.await` in the worker).

use parking_lot::Mutex;

use crate::level::Level;

#[derive(Debug)]
struct Levels {
    start: Level,
    initial_bundle: Level,
}

/// Lock-guarded `StartLevel` and `InitialBundleStartLevel`.
#[derive(Debug)]
pub(crate) struct LevelState {
    inner: Mutex<Levels>,
}

impl LevelState {
    /// Start level 0 with the given initial component level.
    pub(crate) fn new(initial_bundle: Level) -> Self {
        Self {
            inner: Mutex::new(Levels {
                start: Level::ZERO,
                initial_bundle,
            }),
        }
    }

    pub(crate) fn start_level(&self) -> Level {
        self.inner.lock().start
    }

    /// Commits one step of a transition.
    pub(crate) fn commit(&self, level: Level) {
        self.inner.lock().start = level;
    }

    pub(crate) fn initial_bundle(&self) -> Level {
        self.inner.lock().initial_bundle
    }

    /// Replaces the initial component level, returning the previous value.
    pub(crate) fn set_initial_bundle(&self, level: Level) -> Level {
        std::mem::replace(&mut self.inner.lock().initial_bundle, level)
    }
}
