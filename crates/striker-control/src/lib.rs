#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library that turns steering errors into discrete motion commands."]
#![doc = ""]
#![doc = "The selector is a one-shot classifier: it keeps no memory between calls. Commands"]
#![doc = "are delivered through an injected [`CommandSink`] rather than a global dispatcher."]

extern crate alloc;

pub mod command;
pub mod sink;

pub use command::{MotionCommand, Thresholds, select_command};
pub use sink::CommandSink;

use striker_geometry::{Point2D, RobotPose, Steering, steer};

/// Selects a command for the given heading error and distance and sends it to `sink`.
///
/// # Errors
///
/// Propagates the sink's error if the command could not be delivered.
///
/// # Returns
///
/// The command that was sent.
pub fn dispatch<S: CommandSink>(
    sink: &mut S,
    heading_error: f64,
    distance: f64,
    thresholds: &Thresholds,
) -> Result<MotionCommand, S::Error> {
    let command = select_command(heading_error, distance, thresholds);
    sink.send(command)?;
    Ok(command)
}

/// One control step: steer from `pose` towards `target`, then dispatch the resulting command.
///
/// # Errors
///
/// Propagates the sink's error if the command could not be delivered.
///
/// # Returns
///
/// The steering solution together with the command that was sent.
pub fn control_step<S: CommandSink>(
    sink: &mut S,
    pose: &RobotPose,
    target: Point2D,
    thresholds: &Thresholds,
) -> Result<(Steering, MotionCommand), S::Error> {
    let steering = steer(pose, target);
    let command = dispatch(sink, steering.heading_error_deg, steering.distance, thresholds)?;
    Ok((steering, command))
}
