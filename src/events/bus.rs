//! # Broadcast bus for sequencer events.
//!
//! Publishing never waits. Every receiver reads from one shared ring of
//! `capacity` events:
//!
//! ```text
//! StartLevelSequencer ──┐
//! CommandExecutor ──────┼──► Bus ──┬──► subscriber listener ──► SubscriberSet
//! Engine ───────────────┤          └──► StartLevelSequencer::subscribe() receivers
//! SubscriberSet workers ┘
//! ```
//!
//! A receiver more than `capacity` events behind gets `RecvError::Lagged(n)`
//! and resumes from the oldest retained event. Events published while nobody
//! listens are gone.

use tokio::sync::broadcast;

use super::event::Event;

/// Cloneable publishing handle; all clones feed the same receivers.
#[derive(Clone, Debug)]
pub struct Bus {
    sender: broadcast::Sender<Event>,
}

impl Bus {
    /// Bus retaining up to `capacity` undelivered events (at least one).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes `event` to the receivers alive right now.
    pub fn publish(&self, event: Event) {
        // no receivers is not an error
        let _ = self.sender.send(event);
    }

    /// Receiver for events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Number of receivers currently attached.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
