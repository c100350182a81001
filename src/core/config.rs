//! # Sequencer configuration.
//!
//! Provides [`SequencerConfig`], the centralized settings for one
//! [`StartLevelSequencer`](crate::StartLevelSequencer).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1
//! - `executor.command_timeout = 0s` → no watchdog
//! - `executor.queue_capacity = 0` → clamped to 1

use crate::executor::ExecutorConfig;
use crate::level::Level;

/// Configuration for the start-level sequencer.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1)
/// - `initial_bundle_start_level`: level assigned to newly admitted components (must be > 0)
/// - `executor`: queue size and watchdog behavior
#[derive(Clone, Debug)]
pub struct SequencerConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` messages skip older items.
    pub bus_capacity: usize,

    /// Initial start level for newly admitted components.
    ///
    /// Independent of the current start level. Zero is rejected by the builder.
    pub initial_bundle_start_level: Level,

    /// Command queue and watchdog settings.
    pub executor: ExecutorConfig,
}

impl SequencerConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SequencerConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `initial_bundle_start_level = 1`
    /// - `executor = ExecutorConfig::default()` (queue 64, 5 min watchdog, warn only)
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            initial_bundle_start_level: Level::ONE,
            executor: ExecutorConfig::default(),
        }
    }
}
