//! # Framework collaborator seam.
//!
//! The sequencer does not start or stop components itself. It drives an
//! external runtime through the [`Framework`] trait, once before and once
//! after every level it walks through.
//!
//! ## Contents
//! - [`Framework`] the two-callback collaborator (`level_changing` / `level_changed`)
//! - [`FrameworkSource`] the owning component handle; resolved before **every** callback
//! - [`FrameworkSlot`] a hot-swappable source (replace or clear the collaborator at runtime)
//! - [`FrameworkListener`], [`Listeners`], [`FrameworkEvent`] caller-supplied completion
//!   listeners and their guarded fan-out
//!
//! ## Wiring
//! ```text
//! set_start_level(T, listeners)
//!     └─► TransitionCommand { target: T, listeners }
//!            └─► Engine, per step (old → new):
//!                  source.framework()?.level_changing(old, new, &listeners)
//!                  commit(new)
//!                  source.framework()?.level_changed(old, new, &listeners)
//!                                            └─► listeners.fire(&FrameworkEvent)
//! ```

mod listener;
mod source;
mod traits;

pub use listener::{FanOut, FrameworkEvent, FrameworkEventKind, FrameworkListener, Listeners};
pub use source::{FrameworkSlot, FrameworkSource};
pub use traits::Framework;
