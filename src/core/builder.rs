use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    core::{Engine, LevelState, SequencerConfig, StartLevelSequencer},
    error::LevelError,
    events::Bus,
    executor::CommandExecutor,
    framework::FrameworkSource,
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`StartLevelSequencer`].
pub struct SequencerBuilder {
    cfg: SequencerConfig,
    source: Arc<dyn FrameworkSource>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SequencerBuilder {
    /// Creates a new builder driving the framework yielded by `source`.
    pub fn new(cfg: SequencerConfig, source: impl FrameworkSource) -> Self {
        Self {
            cfg,
            source: Arc::new(source),
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Validates the configuration and starts the sequencer.
    ///
    /// Spawns the executor worker and the subscriber workers, so it must be
    /// called from within a tokio runtime.
    ///
    /// # Errors
    /// [`LevelError::NonPositiveInitial`] if `initial_bundle_start_level` is zero.
    pub fn build(self) -> Result<Arc<StartLevelSequencer>, LevelError> {
        let initial = self.cfg.initial_bundle_start_level;
        if initial.get() == 0 {
            return Err(LevelError::NonPositiveInitial { value: 0 });
        }

        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let state = Arc::new(LevelState::new(initial));
        let runtime_token = CancellationToken::new();

        let engine = Arc::new(Engine::new(Arc::clone(&state), self.source, bus.clone()));
        let executor = CommandExecutor::spawn(self.cfg.executor.clone(), engine, bus.clone());

        Ok(Arc::new(StartLevelSequencer::new_internal(
            self.cfg,
            bus,
            subs,
            state,
            executor,
            runtime_token,
        )))
    }
}
