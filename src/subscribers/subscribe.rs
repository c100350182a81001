//! # The subscriber extension point.
//!
//! A [`Subscribe`] implementation observes every runtime [`Event`] the
//! sequencer publishes. The [`SubscriberSet`](crate::SubscriberSet) gives
//! each subscriber its own bounded queue and worker task, so a slow
//! subscriber only ever delays itself. When its queue is full the event is
//! skipped for that subscriber and `SubscriberOverflow` is published.

use async_trait::async_trait;

use crate::events::Event;

/// Observer of sequencer events.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes one event. Runs on the subscriber's own worker task.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow/panic reports. Defaults to the type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Events this subscriber may have pending before new ones are skipped.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
