//! # Owning component handle.
//!
//! A [`FrameworkSource`] yields the collaborator the sequencer should talk to
//! **right now**. The engine asks it again before every callback and never
//! keeps the result between callbacks, so the embedding runtime may replace
//! or withdraw the collaborator while a transition is running.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::framework::Framework;

/// Resolves the current framework collaborator.
pub trait FrameworkSource: Send + Sync + 'static {
    /// Returns the collaborator, or `None` if the owner is gone.
    fn framework(&self) -> Option<Arc<dyn Framework>>;
}

impl<F> FrameworkSource for Arc<F>
where
    F: Framework,
{
    fn framework(&self) -> Option<Arc<dyn Framework>> {
        Some(Arc::clone(self) as Arc<dyn Framework>)
    }
}

impl FrameworkSource for Arc<dyn Framework> {
    fn framework(&self) -> Option<Arc<dyn Framework>> {
        Some(Arc::clone(self))
    }
}

impl<F> FrameworkSource for Weak<F>
where
    F: Framework,
{
    fn framework(&self) -> Option<Arc<dyn Framework>> {
        self.upgrade().map(|f| f as Arc<dyn Framework>)
    }
}

/// Hot-swappable framework handle.
///
/// Clones share the same slot. Replacing the collaborator takes effect at the
/// next callback of a running transition.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use levelvisor::{FrameworkSlot, FrameworkSource};
///
/// let slot = FrameworkSlot::empty();
/// assert!(slot.framework().is_none());
/// ```
#[derive(Clone, Default)]
pub struct FrameworkSlot {
    current: Arc<RwLock<Option<Arc<dyn Framework>>>>,
}

impl FrameworkSlot {
    /// Creates a slot holding `framework`.
    pub fn new(framework: Arc<dyn Framework>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(framework))),
        }
    }

    /// Creates a slot with no collaborator; transitions fail until one is set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Installs `framework`, returning the previous collaborator.
    pub fn replace(&self, framework: Arc<dyn Framework>) -> Option<Arc<dyn Framework>> {
        self.current.write().replace(framework)
    }

    /// Withdraws the collaborator, returning it.
    pub fn clear(&self) -> Option<Arc<dyn Framework>> {
        self.current.write().take()
    }
}

impl FrameworkSource for FrameworkSlot {
    fn framework(&self) -> Option<Arc<dyn Framework>> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameworkError;
    use crate::framework::Listeners;
    use crate::level::Level;
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

    #[test]
    fn weak_source_follows_owner_lifetime() {
        let owner = Arc::new(Nop);
        let weak = Arc::downgrade(&owner);
        assert!(weak.framework().is_some());
        drop(owner);
        assert!(weak.framework().is_none());
    }

    #[test]
    fn slot_clones_share_state() {
        let slot = FrameworkSlot::empty();
        let view = slot.clone();
        assert!(view.framework().is_none());

        assert!(slot.replace(Arc::new(Nop)).is_none());
        assert!(view.framework().is_some());

        assert!(view.clear().is_some());
        assert!(slot.framework().is_none());
    }
}
