//! # levelvisor
//!
//! **Levelvisor** drives a modular runtime through ordered start levels.
//!
//! Components are assigned to numbered tiers; the runtime activates tiers in
//! increasing order and deactivates them in decreasing order. The crate owns
//! the current start level, accepts requests to move it, and walks it one
//! level at a time, asking a [`Framework`] collaborator to do the actual
//! component work around every step.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   set_start_level(T, listeners)        set_initial_bundle_start_level(N)
//!               │                                      │
//!               ▼                                      ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  StartLevelSequencer (inbound API)                                │
//! │  - LevelState (StartLevel, InitialBundleStartLevel under a lock)  │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ TransitionCommand{ T, listeners }  (try_send, never waits)
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  CommandExecutor: bounded FIFO queue, one worker, watchdog        │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Engine: for each step (L-1 → L) or (L → L-1)                     │
//! │    source.framework()?.level_changing(old, new, listeners)        │
//! │    commit(new)                                                    │
//! │    source.framework()?.level_changed(old, new, listeners)         │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ Publishes: TransitionStarted, LevelChanging, LevelChanged,
//!        │            TransitionCompleted / TransitionFailed, ...
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                   Bus (broadcast channel)                         │
//! │              (capacity: SequencerConfig::bus_capacity)            │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                    ┌────────────────────────┐
//!                    │  subscriber listener   │
//!                    └───────────┬────────────┘
//!                                ▼
//!                          SubscriberSet
//!                      ┌─────────┼─────────┐
//!                      ▼         ▼         ▼
//!                   worker1   worker2   workerN
//! ```
//!
//! ### Step enumeration
//! ```text
//! C < T : (C→C+1), (C+1→C+2), ..., (T-1→T)
//! C > T : (C→C-1), (C-1→C-2), ..., (T+1→T)
//! C = T : (T→T)   one no-op pair; the level is not changed
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------|-------------------------------------------|
//! | **Sequencer**     | Request level changes, read levels, stop the worker.        | [`StartLevelSequencer`]                   |
//! | **Collaborator**  | Component activation per step, swappable at runtime.        | [`Framework`], [`FrameworkSource`], [`FrameworkSlot`] |
//! | **Listeners**     | Per-request observers notified by the collaborator.         | [`FrameworkListener`], [`Listeners`]      |
//! | **Subscriber API**| Hook into runtime events (logging, metrics, custom).        | [`Subscribe`], [`Event`]                  |
//! | **Launch plans**  | `auto.start.<N>` component lists and the beginning level.   | [`LevelPlan`]                             |
//! | **Errors**        | Typed errors for the API, the collaborator and transitions. | [`LevelError`], [`TransitionError`]       |
//! | **Configuration** | Queue size, watchdog, bus capacity, initial level.          | [`SequencerConfig`], [`ExecutorConfig`]   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use levelvisor::{
//!     EventKind, Framework, FrameworkError, FrameworkEvent, FrameworkListener, Level,
//!     Listeners, SequencerConfig, StartLevelSequencer,
//! };
//!
//! struct Components;
//!
//! #[async_trait]
//! impl Framework for Components {
//!     async fn level_changing(&self, old: Level, new: Level, _: &Listeners) -> Result<(), FrameworkError> {
//!         if new < old {
//!             println!("stopping tier {old}");
//!         }
//!         Ok(())
//!     }
//!
//!     async fn level_changed(&self, old: Level, new: Level, listeners: &Listeners) -> Result<(), FrameworkError> {
//!         if new > old {
//!             println!("started tier {new}");
//!         }
//!         listeners.fire(&FrameworkEvent::start_level_changed(new));
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Build subscribers (optional)
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn levelvisor::Subscribe>> = vec![Arc::new(levelvisor::LogWriter::new())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn levelvisor::Subscribe>> = Vec::new();
//!
//!     let seq = StartLevelSequencer::builder(SequencerConfig::default(), Arc::new(Components))
//!         .with_subscribers(subs)
//!         .build()?;
//!     let mut events = seq.subscribe();
//!
//!     let printer: Arc<dyn FrameworkListener> = Arc::new(|ev: &FrameworkEvent| {
//!         println!("framework event: {:?} at {}", ev.kind, ev.level);
//!     });
//!     seq.set_start_level(2, [printer])?;
//!
//!     while let Ok(ev) = events.recv().await {
//!         if ev.kind == EventKind::TransitionCompleted {
//!             break;
//!         }
//!     }
//!     assert_eq!(seq.start_level(), Level::new(2));
//!
//!     seq.shutdown().await;
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod executor;
mod framework;
mod level;
mod plan;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{SequencerBuilder, SequencerConfig, StartLevelSequencer, Step, Steps, steps};
pub use error::{FrameworkError, LevelError, Phase, PlanError, SubmitError, TransitionError};
pub use events::{Bus, Event, EventKind};
pub use executor::{ExecutorConfig, ExecutorState, TimeoutAction, TransitionCommand};
pub use framework::{
    FanOut, Framework, FrameworkEvent, FrameworkEventKind, FrameworkListener, FrameworkSlot,
    FrameworkSource, Listeners,
};
pub use level::Level;
pub use plan::LevelPlan;
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
