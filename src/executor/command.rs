use crate::framework::Listeners;
use crate::level::Level;

/// One request to move the start level.
///
/// Immutable; consumed exactly once by the executor.
#[derive(Clone, Debug)]
pub struct TransitionCommand {
    target: Level,
    listeners: Listeners,
}

impl TransitionCommand {
    pub fn new(target: Level, listeners: Listeners) -> Self {
        Self { target, listeners }
    }

    /// The requested level.
    pub fn target(&self) -> Level {
        self.target
    }

    /// Listeners passed to every framework callback of this request.
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}
