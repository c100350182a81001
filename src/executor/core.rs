use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::Engine;
use crate::error::{SubmitError, TransitionError};
use crate::events::{Bus, Event, EventKind};
use crate::level::Level;

use super::{
    command::TransitionCommand,
    config::{ExecutorConfig, TimeoutAction},
    state::ExecutorState,
};

/// Single-worker FIFO executor for transition commands.
///
/// Dropping the executor requests shutdown.
pub(crate) struct CommandExecutor {
    tx: mpsc::Sender<TransitionCommand>,
    token: CancellationToken,
    state: Arc<Mutex<ExecutorState>>,
    bus: Bus,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CommandExecutor {
    /// Creates the queue and spawns the worker on the current tokio runtime.
    pub(crate) fn spawn(config: ExecutorConfig, engine: Arc<Engine>, bus: Bus) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity_clamped());
        let token = CancellationToken::new();
        let state = Arc::new(Mutex::new(ExecutorState::Idle));

        let worker = Worker {
            config,
            engine,
            bus: bus.clone(),
            state: Arc::clone(&state),
            token: token.clone(),
            rx,
        };
        let handle = tokio::spawn(worker.run());

        Self {
            tx,
            token,
            state,
            bus,
            worker: Mutex::new(Some(handle)),
        }
    }

    /// Enqueues `cmd` without waiting.
    pub(crate) fn execute(&self, cmd: TransitionCommand) -> Result<(), SubmitError> {
        if self.token.is_cancelled() {
            return Err(SubmitError::Closed);
        }
        let target = cmd.target();
        let listeners = cmd.listeners().len();

        self.tx.try_send(cmd).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })?;

        self.bus.publish(
            Event::new(EventKind::TransitionQueued)
                .with_target(target)
                .with_listeners(listeners),
        );
        Ok(())
    }

    /// Stops accepting commands and discards the queued ones.
    ///
    /// The in-flight command, if any, runs to completion.
    pub(crate) fn shutdown_now(&self) {
        if !self.state.lock().request_shutdown() {
            return;
        }
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.token.cancel();
    }

    pub(crate) fn state(&self) -> ExecutorState {
        *self.state.lock()
    }

    /// Waits for the worker to exit. Returns immediately if already joined.
    pub(crate) async fn join(&self) {
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "executor worker ended abnormally");
            }
        }
    }
}

impl Drop for CommandExecutor {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct Worker {
    config: ExecutorConfig,
    engine: Arc<Engine>,
    bus: Bus,
    state: Arc<Mutex<ExecutorState>>,
    token: CancellationToken,
    rx: mpsc::Receiver<TransitionCommand>,
}

impl Worker {
    async fn run(mut self) {
        loop {
            let cmd = tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                cmd = self.rx.recv() => match cmd {
                    Some(cmd) => cmd,
                    None => break,
                },
            };

            self.state.lock().begin(cmd.target());
            self.handle(&cmd).await;
            self.state.lock().finish();
        }
        self.stop();
    }

    async fn handle(&self, cmd: &TransitionCommand) {
        let target = cmd.target();
        match self.guarded(cmd).await {
            Ok(level) => {
                debug!(level = level.get(), "transition completed");
                self.bus.publish(
                    Event::new(EventKind::TransitionCompleted)
                        .with_to(level)
                        .with_target(target),
                );
            }
            Err(err) => {
                let level = self.engine.start_level();
                warn!(
                    error = %err,
                    label = err.as_label(),
                    level = level.get(),
                    requested = target.get(),
                    "transition aborted"
                );
                self.bus.publish(
                    Event::new(EventKind::TransitionFailed)
                        .with_to(level)
                        .with_target(target)
                        .with_reason(err.to_string()),
                );
            }
        }
    }

    /// Runs the engine under the watchdog.
    async fn guarded(&self, cmd: &TransitionCommand) -> Result<Level, TransitionError> {
        let walk = self.engine.run(cmd);
        let Some(limit) = self.config.timeout() else {
            return walk.await;
        };
        tokio::pin!(walk);

        tokio::select! {
            res = &mut walk => return res,
            _ = time::sleep(limit) => {}
        }

        warn!(
            requested = cmd.target().get(),
            timeout_ms = limit.as_millis() as u64,
            action = ?self.config.on_timeout,
            "transition exceeded command timeout"
        );
        self.bus.publish(
            Event::new(EventKind::CommandTimedOut)
                .with_target(cmd.target())
                .with_timeout(limit),
        );

        match self.config.on_timeout {
            TimeoutAction::Warn => walk.await,
            TimeoutAction::Abort => Err(TransitionError::TimedOut { timeout: limit }),
        }
    }

    /// Discards whatever is still queued and marks the executor stopped.
    fn stop(&mut self) {
        self.rx.close();
        let mut dropped = 0usize;
        while let Ok(cmd) = self.rx.try_recv() {
            dropped += 1;
            self.bus
                .publish(Event::new(EventKind::CommandDropped).with_target(cmd.target()));
        }
        if dropped > 0 {
            warn!(dropped, "discarded queued transitions at shutdown");
        }

        *self.state.lock() = ExecutorState::Stopped;
        self.bus
            .publish(Event::new(EventKind::ExecutorStopped).with_dropped(dropped));
    }
}
