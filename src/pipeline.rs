use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use image::RgbImage;
use striker_control::{CommandSink, MotionCommand, Thresholds, control_step};
use striker_geometry::{Point2D, RobotPose, Steering, shooting_point};
use striker_vision::{DetectorConfig, FieldWarp, locate_marker, locate_robot_in_image};
use tokio::sync::broadcast;
use tokio::time;
use tracing::{debug, info, warn};

use crate::blackboard::{Blackboard, raise_fault, record_frame, snapshot, touch_cmd};
use crate::bus::Topic;
use crate::frames::FrameSource;
use crate::settings::{MarkerRanges, Settings, StrategySettings};

struct Rectifier {
    warp: FieldWarp,
    width: u32,
    height: u32,
}

/// Per-frame perception and decision, built once from validated settings.
pub struct Pipeline {
    markers: MarkerRanges,
    detector: DetectorConfig,
    strategy: StrategySettings,
    thresholds: Thresholds,
    rectifier: Option<Rectifier>,
}

/// Everything one frame produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub pose: Option<RobotPose>,
    pub ball: Option<Point2D>,
    pub goal: Option<Point2D>,
    pub target: Option<Point2D>,
    /// `None` when there was nothing to steer towards.
    pub steering: Option<Steering>,
    pub command: MotionCommand,
}

impl Pipeline {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let rectifier = match &settings.warp {
            Some(warp) => Some(Rectifier {
                warp: warp.field_warp()?,
                width: warp.width,
                height: warp.height,
            }),
            None => None,
        };

        Ok(Pipeline {
            markers: settings.markers.ranges()?,
            detector: settings.markers.detector(),
            strategy: settings.strategy,
            thresholds: settings.thresholds,
            rectifier,
        })
    }

    /// Runs one frame: rectify, locate robot, ball and goal, aim at the shooting
    /// point and send one command to `sink`. The robot stops whenever its pose
    /// or the target is unknown.
    pub fn process_frame<S>(&self, frame: &RgbImage, sink: &mut S) -> anyhow::Result<FrameOutcome>
    where
        S: CommandSink,
        S::Error: std::error::Error + Send + Sync + 'static,
    {
        let rectified;
        let frame = match &self.rectifier {
            Some(r) => {
                rectified = r
                    .warp
                    .warp(frame, r.width, r.height)
                    .context("failed to rectify frame")?;
                &rectified
            }
            None => frame,
        };

        let pose = locate_robot_in_image(frame, &self.markers.front, &self.markers.back, &self.detector);
        let ball = locate_marker(frame, &self.markers.ball, &self.detector);
        let goal = locate_marker(frame, &self.markers.goal, &self.detector);
        let target = shooting_point(ball, goal, self.strategy.extension, self.strategy.from_goal_side);

        let (steering, command) = match (pose, target) {
            (Some(pose), Some(target)) => {
                let (steering, command) = control_step(sink, &pose, target, &self.thresholds)
                    .context("failed to deliver motion command")?;
                (Some(steering), command)
            }
            _ => {
                warn!(?pose, ?ball, ?goal, "Robot or shooting point not visible, stopping");
                sink.send(MotionCommand::Stop)
                    .context("failed to deliver motion command")?;
                (None, MotionCommand::Stop)
            }
        };

        Ok(FrameOutcome { pose, ball, goal, target, steering, command })
    }
}

/// Processes one frame per tick until the frame source runs dry.
pub async fn control_task(
    bb: Blackboard,
    pipeline: Pipeline,
    mut frames: FrameSource,
    mut commands: Topic<MotionCommand>,
    period: Duration,
) -> anyhow::Result<()> {
    info!(frames = frames.remaining(), ?period, "Control task started.");
    let mut ticker = time::interval(period);

    loop {
        ticker.tick().await;
        let Some((path, frame)) = frames.next() else {
            break;
        };

        let image = match frame {
            Ok(image) => image,
            Err(e) => {
                warn!(path = %path.display(), "Skipping frame: {:#}", e);
                raise_fault(&bb, &format!("{:#}", e));
                continue;
            }
        };

        let outcome = pipeline
            .process_frame(&image, &mut commands)
            .with_context(|| format!("processing frame {}", path.display()))?;
        record_frame(&bb, outcome.pose, outcome.target);
        touch_cmd(&bb, outcome.command);

        debug!(
            path = %path.display(),
            pose = ?outcome.pose,
            target = ?outcome.target,
            heading_error = outcome.steering.map(|s| s.heading_error_deg),
            distance = outcome.steering.map(|s| s.distance),
            command = outcome.command.event_name(),
            "Processed frame"
        );
    }

    info!(frames_processed = snapshot(&bb).frames_processed, "Frame source exhausted, control task finished.");
    Ok(())
}

/// Stands in for the motor layer: logs each command's event name until the topic closes.
pub async fn actuator_task(mut commands: broadcast::Receiver<Arc<MotionCommand>>) -> anyhow::Result<()> {
    info!("Actuator task started.");
    loop {
        match commands.recv().await {
            Ok(command) => info!(event = command.event_name(), "Motion command"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Actuator fell behind, commands dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    info!("Command topic closed, actuator task finished.");
    Ok(())
}
