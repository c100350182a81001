#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use levelvisor::{
    Event, EventKind, Framework, FrameworkError, FrameworkEvent, FrameworkListener, Level,
    Listeners, Phase, SequencerConfig, StartLevelSequencer,
};
use parking_lot::Mutex;
use tokio::sync::broadcast;

/// One framework callback as observed by [`Recorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub phase: Phase,
    pub old: u32,
    pub new: u32,
    pub listeners: usize,
}

pub fn changing(old: u32, new: u32) -> (Phase, u32, u32) {
    (Phase::Changing, old, new)
}

pub fn changed(old: u32, new: u32) -> (Phase, u32, u32) {
    (Phase::Changed, old, new)
}

/// Framework double: records every callback, fires listeners on `level_changed`,
/// and can be told to fail or stall on a given step.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
    fail: Mutex<Option<(Phase, u32)>>,
    stall: Mutex<Option<(u32, Duration)>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Calls without the listener count, for compact assertions.
    pub fn pairs(&self) -> Vec<(Phase, u32, u32)> {
        self.calls
            .lock()
            .iter()
            .map(|c| (c.phase, c.old, c.new))
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Drops any configured failure or stall.
    pub fn heal(&self) {
        *self.fail.lock() = None;
        *self.stall.lock() = None;
    }

    /// Fails `phase` of the step heading to `new`.
    pub fn fail_at(&self, phase: Phase, new: u32) {
        *self.fail.lock() = Some((phase, new));
    }

    /// Sleeps `d` inside `level_changing` of the step heading to `new`.
    pub fn stall_at(&self, new: u32, d: Duration) {
        *self.stall.lock() = Some((new, d));
    }

    fn record(&self, phase: Phase, old: Level, new: Level, listeners: &Listeners) -> Result<(), FrameworkError> {
        self.calls.lock().push(Call {
            phase,
            old: old.get(),
            new: new.get(),
            listeners: listeners.len(),
        });
        if *self.fail.lock() == Some((phase, new.get())) {
            return Err(FrameworkError::component(
                format!("tier-{}", new.get()),
                "refused to start",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Framework for Recorder {
    async fn level_changing(&self, old: Level, new: Level, listeners: &Listeners) -> Result<(), FrameworkError> {
        let stall = *self.stall.lock();
        if let Some((at, d)) = stall {
            if at == new.get() {
                tokio::time::sleep(d).await;
            }
        }
        self.record(Phase::Changing, old, new, listeners)
    }

    async fn level_changed(&self, old: Level, new: Level, listeners: &Listeners) -> Result<(), FrameworkError> {
        self.record(Phase::Changed, old, new, listeners)?;
        listeners.fire(&FrameworkEvent::start_level_changed(new));
        Ok(())
    }
}

/// Listener collecting the levels it was notified about.
#[derive(Default)]
pub struct Collect {
    pub levels: Mutex<Vec<u32>>,
}

impl Collect {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn levels(&self) -> Vec<u32> {
        self.levels.lock().clone()
    }
}

impl FrameworkListener for Collect {
    fn framework_event(&self, event: &FrameworkEvent) {
        self.levels.lock().push(event.level.get());
    }
}

pub fn listener<L: FrameworkListener>(l: &Arc<L>) -> Arc<dyn FrameworkListener> {
    Arc::clone(l) as Arc<dyn FrameworkListener>
}

pub fn build(fw: &Arc<Recorder>) -> Arc<StartLevelSequencer> {
    build_with(fw, SequencerConfig::default())
}

pub fn build_with(fw: &Arc<Recorder>, cfg: SequencerConfig) -> Arc<StartLevelSequencer> {
    StartLevelSequencer::builder(cfg, Arc::clone(fw))
        .build()
        .expect("sequencer builds")
}

/// Receives events until one of `kind` arrives.
pub async fn wait_for(rx: &mut broadcast::Receiver<Event>, kind: EventKind) -> Event {
    let fut = async {
        loop {
            match rx.recv().await {
                Ok(ev) if ev.kind == kind => return ev,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => panic!("bus closed waiting for {kind:?}"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(600), fut)
        .await
        .unwrap_or_else(|_| panic!("no {kind:?} event"))
}

/// Waits for `n` terminal events (completed or failed), in arrival order.
pub async fn wait_terminal(rx: &mut broadcast::Receiver<Event>, n: usize) -> Vec<Event> {
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let ev = tokio::time::timeout(Duration::from_secs(600), rx.recv())
            .await
            .expect("terminal event in time")
            .expect("bus open");
        if ev.is_terminal() {
            out.push(ev);
        }
    }
    out
}
