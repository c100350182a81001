//! # Serialized command executor.
//!
//! Accepts transition requests from any thread and runs them one at a time,
//! in submission order, on a single worker task.
//!
//! ## Architecture
//! ```text
//! set_start_level() ──try_send──► [bounded queue] ──► worker ──► Engine::run(cmd)
//!        (never waits)                                  │            │
//!                                                       │     watchdog: command_timeout
//!                                                       │       ├─ Warn  → CommandTimedOut, keep waiting
//!                                                       │       └─ Abort → CommandTimedOut, drop the walk
//!                                                       ▼
//!                                 shutdown_now(): token.cancel()
//!                                   └─► worker finishes the in-flight command,
//!                                       discards the rest (CommandDropped), ExecutorStopped
//! ```
//!
//! ## Invariants
//! - At most one transition runs at a time; queued commands run strictly in FIFO order.
//! - An in-flight transition is never interrupted by `shutdown_now`.
//! - After `shutdown_now`, `execute` returns [`SubmitError::Closed`](crate::SubmitError::Closed).

mod command;
mod config;
mod core;
mod state;

pub use command::TransitionCommand;
pub use config::{ExecutorConfig, TimeoutAction};
pub(crate) use self::core::CommandExecutor;
pub use state::ExecutorState;
