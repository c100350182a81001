//! # Event subscribers for the levelvisor runtime.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`]
//! fan-out used to deliver runtime events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Engine / Executor ── publish(Event) ──► Bus ──► bus listener ──► SubscriberSet
//!                                                                        │
//!                                                         ┌──────────────┼──────────────┐
//!                                                         ▼              ▼              ▼
//!                                                     LogWriter       Metrics        Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use levelvisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::TransitionFailed {
//!             // increment failure counter
//!         }
//!     }
//! }
//! ```

mod embedded;
mod set;
mod subscribe;

pub use set::SubscriberSet;
pub(crate) use set::panic_message;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
