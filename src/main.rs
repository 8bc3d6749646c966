mod blackboard; // brings `blackboard.rs` in as `crate::blackboard`
mod bus; // brings `bus.rs` in as `crate::bus`
mod frames;
mod pipeline;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use blackboard::{Blackboard, snapshot};
use bus::Topic;
use frames::FrameSource;
use pipeline::{Pipeline, actuator_task, control_task};
use striker_control::MotionCommand;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Striker controller starting.");

    let settings = settings::load_settings()?;
    let pipeline = Pipeline::from_settings(&settings)?;
    let frames = FrameSource::open(&settings.frames.dir)?;
    let period = Duration::from_millis(settings.frames.period_ms);

    let bb: Blackboard = Arc::default();
    let command_topic: Topic<MotionCommand> = Topic::new(16);

    info!("Spawning actuator task...");
    let actuator = tokio::spawn(actuator_task(command_topic.subscribe()));

    // The control task owns the only sender; the actuator stops once it is done.
    let control = control_task(bb.clone(), pipeline, frames, command_topic, period).await;
    if let Err(e) = &control {
        error!("Control task failed: {:#}", e);
    }

    actuator.await.context("actuator task panicked")??;

    let state = snapshot(&bb);
    if !state.faults.is_empty() {
        warn!(faults = ?state.faults, "Faults raised during the run");
    }
    info!(
        frames_processed = state.frames_processed,
        last_command = state.last_command.map(|c| c.event_name()),
        last_command_age = ?state.command_age(),
        "Striker controller finished."
    );
    control
}
