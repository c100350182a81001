//! Runtime core: level bookkeeping and the transition walk.
//!
//! The public API from this module is [`StartLevelSequencer`] (plus its
//! builder and config) and the pure step enumeration [`steps`](fn@steps).
//!
//! Internal modules:
//! - `state`: the lock-guarded levels;
//! - `engine`: walks one command's steps against the framework;
//! - `sequencer`: inbound API, wiring of bus, subscribers and executor;
//! - `builder`: validated construction.

mod builder;
mod config;
mod engine;
mod sequencer;
mod state;
mod steps;

pub use builder::SequencerBuilder;
pub use config::SequencerConfig;
pub use sequencer::StartLevelSequencer;
pub use steps::{Step, Steps, steps};

pub(crate) use engine::Engine;
pub(crate) use state::LevelState;
