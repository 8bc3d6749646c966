//! The discrete command set and the one-shot selector.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discrete movement command understood by the robot's actuator layer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionCommand {
    /// Turn in place clockwise.
    RotateRight,
    /// Turn in place counter-clockwise.
    RotateLeft,
    /// Drive forward one step.
    MoveForward,
    /// Stay put.
    Stop,
}

impl MotionCommand {
    /// The event name the actuator dispatcher listens for.
    pub const fn event_name(&self) -> &'static str {
        match self {
            MotionCommand::RotateRight => "rodar_direita",
            MotionCommand::RotateLeft => "rodar_esquerda",
            MotionCommand::MoveForward => "andar300",
            MotionCommand::Stop => "parar",
        }
    }

    /// Parses an event name back into a command.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "rodar_direita" => Some(MotionCommand::RotateRight),
            "rodar_esquerda" => Some(MotionCommand::RotateLeft),
            "andar300" => Some(MotionCommand::MoveForward),
            "parar" => Some(MotionCommand::Stop),
            _ => None,
        }
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Limits that decide between turning, driving and stopping.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Heading errors larger than this (degrees, absolute) are corrected by rotating.
    pub rotation_deg: f64,
    /// Distances larger than this are closed by driving forward.
    pub distance: f64,
}

impl Thresholds {
    /// Construct new thresholds.
    pub const fn new(rotation_deg: f64, distance: f64) -> Self {
        Thresholds { rotation_deg, distance }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::new(30.0, 50.0)
    }
}

/// Selects exactly one command for the current heading error and distance.
///
/// Rotation takes priority: if `|heading_error| > rotation_deg` the robot
/// turns towards the target (right for negative errors, left for positive).
/// Otherwise it drives forward while `distance > thresholds.distance`, and
/// stops once within range. A NaN error or distance never triggers motion.
pub fn select_command(heading_error: f64, distance: f64, thresholds: &Thresholds) -> MotionCommand {
    if heading_error.is_nan() || distance.is_nan() {
        return MotionCommand::Stop;
    }
    if heading_error > thresholds.rotation_deg || heading_error < -thresholds.rotation_deg {
        if heading_error < 0.0 {
            MotionCommand::RotateRight
        } else {
            MotionCommand::RotateLeft
        }
    } else if distance > thresholds.distance {
        MotionCommand::MoveForward
    } else {
        MotionCommand::Stop
    }
}
