//! # StartLevelSequencer: inbound API over the executor and the engine.
//!
//! The [`StartLevelSequencer`] owns the shared levels, the event bus, the
//! subscriber fan-out and the command executor. Requests are validated here,
//! synchronously, and then handed to the executor without waiting.
//!
//! ## High-level architecture
//! ```text
//! set_start_level(T, listeners)
//!   ├─ T < 0                    ─► Err(LevelError::Negative)     (nothing queued)
//!   └─ TransitionCommand{T, ..} ─► CommandExecutor::execute()    (try_send, returns at once)
//!                                      └─► worker ─► Engine::run()
//!                                                      └─► Framework callbacks per step
//!
//! Event flow:
//!   Engine / Executor ── publish(Event) ──► Bus ──► bus listener ──► SubscriberSet::emit(&Event)
//!                                            └────► subscribe() receivers
//!
//! stop()      ─► CommandExecutor::shutdown_now()
//! shutdown()  ─► stop() + wait for the worker to exit
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use levelvisor::{
//!     EventKind, Framework, FrameworkError, FrameworkEvent, Level, Listeners,
//!     SequencerConfig, StartLevelSequencer,
//! };
//!
//! struct Runtime;
//!
//! #[async_trait]
//! impl Framework for Runtime {
//!     async fn level_changing(&self, _: Level, _: Level, _: &Listeners) -> Result<(), FrameworkError> {
//!         Ok(())
//!     }
//!     async fn level_changed(&self, _: Level, new: Level, listeners: &Listeners) -> Result<(), FrameworkError> {
//!         listeners.fire(&FrameworkEvent::start_level_changed(new));
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seq = StartLevelSequencer::builder(SequencerConfig::default(), Arc::new(Runtime)).build()?;
//!     let mut events = seq.subscribe();
//!
//!     seq.set_start_level(3, Vec::new())?;
//!     while let Ok(ev) = events.recv().await {
//!         if ev.kind == EventKind::TransitionCompleted {
//!             break;
//!         }
//!     }
//!     assert_eq!(seq.start_level(), Level::new(3));
//!
//!     seq.shutdown().await;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    core::{LevelState, SequencerBuilder, SequencerConfig},
    error::{LevelError, SubmitError},
    events::{Bus, Event, EventKind},
    executor::{CommandExecutor, ExecutorState, TransitionCommand},
    framework::{FrameworkListener, FrameworkSource, Listeners},
    level::Level,
    plan::LevelPlan,
    subscribers::SubscriberSet,
};

/// Drives a framework collaborator through ordered start levels.
pub struct StartLevelSequencer {
    cfg: SequencerConfig,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    state: Arc<LevelState>,
    executor: CommandExecutor,
    runtime_token: CancellationToken,
}

impl StartLevelSequencer {
    /// Returns a builder driving the framework yielded by `source`.
    pub fn builder(cfg: SequencerConfig, source: impl FrameworkSource) -> SequencerBuilder {
        SequencerBuilder::new(cfg, source)
    }

    pub(crate) fn new_internal(
        cfg: SequencerConfig,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        state: Arc<LevelState>,
        executor: CommandExecutor,
        runtime_token: CancellationToken,
    ) -> Self {
        let seq = Self {
            cfg,
            bus,
            subs,
            state,
            executor,
            runtime_token,
        };
        seq.subscriber_listener();
        seq
    }

    /// Requests a transition to `target`.
    ///
    /// Returns as soon as the request is queued; the walk happens on the
    /// executor worker. Every framework callback of this request receives
    /// `listeners`, in the given order.
    ///
    /// # Errors
    /// - [`LevelError::Negative`] for `target < 0` (nothing is queued)
    /// - [`LevelError::Submit`] if the queue is full or the sequencer is stopped
    pub fn set_start_level(
        &self,
        target: i32,
        listeners: impl IntoIterator<Item = Arc<dyn FrameworkListener>>,
    ) -> Result<(), LevelError> {
        let target = Level::try_from(target)?;
        self.request(target, Listeners::new(listeners))?;
        Ok(())
    }

    /// Typed variant of [`set_start_level`](Self::set_start_level).
    pub fn request(&self, target: Level, listeners: Listeners) -> Result<(), SubmitError> {
        debug!(target_level = target.get(), listeners = listeners.len(), "transition requested");
        self.executor
            .execute(TransitionCommand::new(target, listeners))
    }

    /// Current start level.
    pub fn start_level(&self) -> Level {
        self.state.start_level()
    }

    /// Start level assigned to newly admitted components.
    pub fn initial_bundle_start_level(&self) -> Level {
        self.state.initial_bundle()
    }

    /// Changes the start level assigned to newly admitted components.
    ///
    /// Does not touch the current start level.
    ///
    /// # Errors
    /// [`LevelError::NonPositiveInitial`] for `level <= 0`.
    pub fn set_initial_bundle_start_level(&self, level: i32) -> Result<(), LevelError> {
        if level <= 0 {
            return Err(LevelError::NonPositiveInitial {
                value: i64::from(level),
            });
        }
        let level = Level::try_from(level)?;
        let prev = self.state.set_initial_bundle(level);
        self.bus.publish(
            Event::new(EventKind::InitialLevelChanged)
                .with_from(prev)
                .with_to(level),
        );
        Ok(())
    }

    /// Requests the plan's beginning level.
    ///
    /// Returns `Ok(false)` without queuing anything for an empty plan.
    pub fn launch(
        &self,
        plan: &LevelPlan,
        listeners: impl IntoIterator<Item = Arc<dyn FrameworkListener>>,
    ) -> Result<bool, LevelError> {
        let Some(beginning) = plan.beginning_level() else {
            warn!("launch plan lists no components; nothing to start");
            return Ok(false);
        };
        self.request(beginning, Listeners::new(listeners))?;
        Ok(true)
    }

    /// Stops accepting requests and discards queued ones.
    ///
    /// A transition already running is allowed to finish.
    pub fn stop(&self) {
        self.executor.shutdown_now();
    }

    /// [`stop`](Self::stop) and wait for the executor worker to exit.
    pub async fn shutdown(&self) {
        self.stop();
        self.executor.join().await;
    }

    /// State of the executor worker.
    pub fn executor_state(&self) -> ExecutorState {
        self.executor.state()
    }

    /// New receiver for runtime events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The configuration this sequencer was built with.
    pub fn config(&self) -> &SequencerConfig {
        &self.cfg
    }

    /// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
    fn subscriber_listener(&self) {
        if self.subs.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        let token = self.runtime_token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    res = rx.recv() => match res {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "subscriber listener lagged behind the bus");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });
    }
}

impl Drop for StartLevelSequencer {
    fn drop(&mut self) {
        self.executor.shutdown_now();
        self.runtime_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameworkError;
    use crate::framework::Framework;
    use async_trait::async_trait;

    struct Nop;

    #[async_trait]
    impl Framework for Nop {
        async fn level_changing(&self, _: Level, _: Level, _: &Listeners) -> Result<(), FrameworkError> {
            Ok(())
        }
        async fn level_changed(&self, _: Level, _: Level, _: &Listeners) -> Result<(), FrameworkError> {
            Ok(())
        }
    }

    fn sequencer() -> Arc<StartLevelSequencer> {
        StartLevelSequencer::builder(SequencerConfig::default(), Arc::new(Nop))
            .build()
            .expect("valid config")
    }

    #[tokio::test]
    async fn rejects_zero_initial_level_at_build() {
        let cfg = SequencerConfig {
            initial_bundle_start_level: Level::ZERO,
            ..SequencerConfig::default()
        };
        let err = StartLevelSequencer::builder(cfg, Arc::new(Nop))
            .build()
            .err()
            .expect("must fail");
        assert!(matches!(err, LevelError::NonPositiveInitial { value: 0 }));
    }

    #[tokio::test]
    async fn negative_target_is_rejected_before_queuing() {
        let seq = sequencer();
        let mut rx = seq.subscribe();

        let err = seq.set_start_level(-1, Vec::new()).unwrap_err();
        assert_eq!(err.as_label(), "level_negative");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn initial_level_validation_and_update() {
        let seq = sequencer();
        assert_eq!(seq.initial_bundle_start_level(), Level::ONE);

        assert!(matches!(
            seq.set_initial_bundle_start_level(0),
            Err(LevelError::NonPositiveInitial { value: 0 })
        ));
        assert!(matches!(
            seq.set_initial_bundle_start_level(-4),
            Err(LevelError::NonPositiveInitial { value: -4 })
        ));

        seq.set_initial_bundle_start_level(7).expect("positive");
        assert_eq!(seq.initial_bundle_start_level(), Level::new(7));
        assert_eq!(seq.start_level(), Level::ZERO);
    }

    #[tokio::test]
    async fn empty_plan_launches_nothing() {
        let seq = sequencer();
        let launched = seq.launch(&LevelPlan::default(), Vec::new()).expect("ok");
        assert!(!launched);
    }

    #[tokio::test]
    async fn stopped_sequencer_refuses_requests() {
        let seq = sequencer();
        seq.shutdown().await;
        assert_eq!(seq.executor_state(), ExecutorState::Stopped);
        assert!(matches!(
            seq.set_start_level(2, Vec::new()),
            Err(LevelError::Submit(SubmitError::Closed))
        ));
    }
}
