//! # Example: Boot and shut down a tiered runtime
//!
//! Components are listed per level in an `auto.start.<N>` plan. The runtime
//! climbs to the plan's beginning level, starting each tier on the way up,
//! then drops back to level 0, stopping tiers in reverse order.
//!
//! Run with: `RUST_LOG=info cargo run --example boot --features logging`

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use levelvisor::{
    EventKind, Framework, FrameworkError, FrameworkEvent, FrameworkListener, Level, LevelPlan,
    Listeners, LogWriter, SequencerConfig, StartLevelSequencer, Subscribe,
};

const PLAN: &str = "\
# tier 1: infrastructure
auto.start.1 = logging config
auto.start.2 = storage net
auto.start.3 = api
auto.start.4 = ui
";

/// Starts and stops the components a plan assigns to each level.
struct Components {
    plan: LevelPlan,
}

#[async_trait]
impl Framework for Components {
    async fn level_changing(&self, old: Level, new: Level, _: &Listeners) -> Result<(), FrameworkError> {
        if new < old {
            for name in self.plan.components_at(old).iter().rev() {
                println!("[L{old}] stopping {name}");
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
        Ok(())
    }

    async fn level_changed(&self, old: Level, new: Level, listeners: &Listeners) -> Result<(), FrameworkError> {
        if new > old {
            for name in self.plan.components_at(new) {
                println!("[L{new}] starting {name}");
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
        listeners.fire(&FrameworkEvent::start_level_changed(new));
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let plan = LevelPlan::parse(PLAN);
    let framework = Arc::new(Components { plan: plan.clone() });

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let seq = StartLevelSequencer::builder(SequencerConfig::default(), framework)
        .with_subscribers(subs)
        .build()?;
    let mut events = seq.subscribe();

    let progress: Arc<dyn FrameworkListener> = Arc::new(|ev: &FrameworkEvent| {
        println!("-- framework now at level {}", ev.level);
    });

    if !seq.launch(&plan, [Arc::clone(&progress)])? {
        println!("empty plan, nothing to do");
        return Ok(());
    }
    wait_terminal(&mut events).await;
    println!("running at level {} (new components start at {})", seq.start_level(), seq.initial_bundle_start_level());

    seq.set_start_level(0, [progress])?;
    wait_terminal(&mut events).await;

    seq.shutdown().await;
    println!("stopped at level {}", seq.start_level());
    Ok(())
}

async fn wait_terminal(rx: &mut tokio::sync::broadcast::Receiver<levelvisor::Event>) {
    while let Ok(ev) = rx.recv().await {
        if matches!(ev.kind, EventKind::TransitionCompleted | EventKind::TransitionFailed) {
            return;
        }
    }
}
