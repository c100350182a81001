//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the sequencer, the command
//! executor, the transition engine and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `StartLevelSequencer`, `CommandExecutor`, `Engine`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the sequencer's bus listener (fans out to `SubscriberSet`)
//!   and any receiver obtained through `StartLevelSequencer::subscribe`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
