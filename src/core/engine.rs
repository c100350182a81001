//! # Level transition engine.
//!
//! Walks the start level from its current value to a command's target, one
//! level at a time, notifying the framework around every commit.
//!
//! ## Step flow
//! ```text
//! for step in steps(current, target):
//!   publish LevelChanging
//!   source.framework()? ─► level_changing(old, new, listeners)   (no lock held)
//!   commit(new)                                                   (lock held briefly; skipped for no-op)
//!   source.framework()? ─► level_changed(old, new, listeners)    (no lock held)
//!   publish LevelChanged
//! ```
//!
//! ## Rules
//! - The collaborator is resolved before **each** callback, never cached.
//! - The first error aborts the walk; the start level stays at the last
//!   committed step (`old` if `level_changing` failed, `new` if `level_changed` failed).
//! - The same listener set is passed to every callback of one command.

use std::sync::Arc;

use tracing::debug;

use crate::core::state::LevelState;
use crate::core::steps::{Step, steps};
use crate::error::{Phase, TransitionError};
use crate::events::{Bus, Event, EventKind};
use crate::executor::TransitionCommand;
use crate::framework::{Framework, FrameworkSource};
use crate::level::Level;

/// Runs transition commands against the shared state.
pub(crate) struct Engine {
    state: Arc<LevelState>,
    source: Arc<dyn FrameworkSource>,
    bus: Bus,
}

impl Engine {
    pub(crate) fn new(state: Arc<LevelState>, source: Arc<dyn FrameworkSource>, bus: Bus) -> Self {
        Self { state, source, bus }
    }

    /// Current committed start level.
    pub(crate) fn start_level(&self) -> Level {
        self.state.start_level()
    }

    /// Walks to `cmd.target()`; returns the level reached.
    pub(crate) async fn run(&self, cmd: &TransitionCommand) -> Result<Level, TransitionError> {
        let target = cmd.target();
        let current = self.state.start_level();

        self.bus.publish(
            Event::new(EventKind::TransitionStarted)
                .with_from(current)
                .with_target(target),
        );

        for step in steps(current, target) {
            self.walk(step, cmd).await?;
        }
        Ok(self.state.start_level())
    }

    async fn walk(&self, step: Step, cmd: &TransitionCommand) -> Result<(), TransitionError> {
        let Step { old, new } = step;
        debug!(old = old.get(), new = new.get(), "level changing");
        self.publish_step(EventKind::LevelChanging, step, cmd.target());

        self.resolve(step)?
            .level_changing(old, new, cmd.listeners())
            .await
            .map_err(|source| TransitionError::Framework {
                phase: Phase::Changing,
                old,
                new,
                source,
            })?;

        if !step.is_noop() {
            self.state.commit(new);
        }

        self.resolve(step)?
            .level_changed(old, new, cmd.listeners())
            .await
            .map_err(|source| TransitionError::Framework {
                phase: Phase::Changed,
                old,
                new,
                source,
            })?;

        debug!(old = old.get(), new = new.get(), "level changed");
        self.publish_step(EventKind::LevelChanged, step, cmd.target());
        Ok(())
    }

    fn resolve(&self, step: Step) -> Result<Arc<dyn Framework>, TransitionError> {
        self.source
            .framework()
            .ok_or(TransitionError::FrameworkUnavailable {
                old: step.old,
                new: step.new,
            })
    }

    fn publish_step(&self, kind: EventKind, step: Step, target: Level) {
        self.bus.publish(
            Event::new(kind)
                .with_from(step.old)
                .with_to(step.new)
                .with_target(target),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameworkError;
    use crate::framework::{FrameworkSlot, Listeners};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Records callbacks and fails `level_changing` into `fail_into`, if set.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(Phase, u32, u32)>>,
        fail_into: Option<u32>,
    }

    #[async_trait]
    impl Framework for Recorder {
        async fn level_changing(&self, old: Level, new: Level, _: &Listeners) -> Result<(), FrameworkError> {
            self.calls.lock().push((Phase::Changing, old.get(), new.get()));
            if self.fail_into == Some(new.get()) {
                return Err(FrameworkError::Vetoed {
                    level: new,
                    reason: "not today".into(),
                });
            }
            Ok(())
        }

        async fn level_changed(&self, old: Level, new: Level, _: &Listeners) -> Result<(), FrameworkError> {
            self.calls.lock().push((Phase::Changed, old.get(), new.get()));
            Ok(())
        }
    }

    fn engine(fw: Arc<Recorder>) -> (Engine, Arc<LevelState>) {
        let state = Arc::new(LevelState::new(Level::ONE));
        let engine = Engine::new(Arc::clone(&state), Arc::new(fw), Bus::new(64));
        (engine, state)
    }

    fn cmd(target: u32) -> TransitionCommand {
        TransitionCommand::new(Level::new(target), Listeners::empty())
    }

    #[tokio::test]
    async fn pairs_every_step() {
        let fw = Arc::new(Recorder::default());
        let (engine, state) = engine(Arc::clone(&fw));

        let reached = engine.run(&cmd(2)).await.expect("walk");
        assert_eq!(reached, Level::new(2));
        assert_eq!(state.start_level(), Level::new(2));
        assert_eq!(
            *fw.calls.lock(),
            vec![
                (Phase::Changing, 0, 1),
                (Phase::Changed, 0, 1),
                (Phase::Changing, 1, 2),
                (Phase::Changed, 1, 2),
            ]
        );
    }

    #[tokio::test]
    async fn failure_keeps_last_committed_level() {
        let fw = Arc::new(Recorder {
            fail_into: Some(3),
            ..Recorder::default()
        });
        let (engine, state) = engine(Arc::clone(&fw));

        let err = engine.run(&cmd(5)).await.unwrap_err();
        assert!(matches!(
            err,
            TransitionError::Framework {
                phase: Phase::Changing,
                ..
            }
        ));
        assert_eq!(state.start_level(), Level::new(2));
        assert_eq!(fw.calls.lock().last(), Some(&(Phase::Changing, 2, 3)));
    }

    #[tokio::test]
    async fn missing_framework_aborts_before_any_commit() {
        let state = Arc::new(LevelState::new(Level::ONE));
        let engine = Engine::new(
            Arc::clone(&state),
            Arc::new(FrameworkSlot::empty()),
            Bus::new(8),
        );

        let err = engine.run(&cmd(1)).await.unwrap_err();
        assert_eq!(err.as_label(), "transition_framework_unavailable");
        assert_eq!(state.start_level(), Level::ZERO);
    }

    #[tokio::test]
    async fn publishes_step_events() {
        let fw = Arc::new(Recorder::default());
        let state = Arc::new(LevelState::new(Level::ONE));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let engine = Engine::new(state, Arc::new(fw), bus);

        engine.run(&cmd(1)).await.expect("walk");

        let kinds: Vec<EventKind> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|ev| ev.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::TransitionStarted,
                EventKind::LevelChanging,
                EventKind::LevelChanged,
            ]
        );
    }
}
