//! # The framework collaborator trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FrameworkError;
use crate::framework::Listeners;
use crate::level::Level;

/// # External runtime driven through start levels.
///
/// For every step `old → new` of a transition the sequencer calls
/// [`level_changing`](Framework::level_changing), commits `new`, then calls
/// [`level_changed`](Framework::level_changed). When the requested level equals
/// the current one, a single pair with `old == new` is delivered.
///
/// Both callbacks receive the listener set supplied with the request; the
/// framework decides when to [`fire`](Listeners::fire) it (conventionally once
/// per `level_changed`).
///
/// Returning an error aborts the remaining steps; the start level stays at the
/// last committed step. No sequencer lock is held while these run, so
/// implementations may call back into the sequencer.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use levelvisor::{Framework, FrameworkError, FrameworkEvent, Level, Listeners};
///
/// struct Printer;
///
/// #[async_trait]
/// impl Framework for Printer {
///     async fn level_changing(&self, old: Level, new: Level, _: &Listeners) -> Result<(), FrameworkError> {
///         println!("leaving {old} for {new}");
///         Ok(())
///     }
///
///     async fn level_changed(&self, _old: Level, new: Level, listeners: &Listeners) -> Result<(), FrameworkError> {
///         listeners.fire(&FrameworkEvent::start_level_changed(new));
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Framework: Send + Sync + 'static {
    /// Called before the level moves from `old` to `new`.
    ///
    /// Ascending steps start the components registered at `new`; descending
    /// steps stop the components registered at `old`.
    async fn level_changing(
        &self,
        old: Level,
        new: Level,
        listeners: &Listeners,
    ) -> Result<(), FrameworkError>;

    /// Called after the level has been committed to `new`.
    async fn level_changed(
        &self,
        old: Level,
        new: Level,
        listeners: &Listeners,
    ) -> Result<(), FrameworkError>;
}

#[async_trait]
impl<F> Framework for Arc<F>
where
    F: Framework + ?Sized,
{
    async fn level_changing(
        &self,
        old: Level,
        new: Level,
        listeners: &Listeners,
    ) -> Result<(), FrameworkError> {
        (**self).level_changing(old, new, listeners).await
    }

    async fn level_changed(
        &self,
        old: Level,
        new: Level,
        listeners: &Listeners,
    ) -> Result<(), FrameworkError> {
        (**self).level_changed(old, new, listeners).await
    }
}
