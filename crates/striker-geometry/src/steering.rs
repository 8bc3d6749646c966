//! Steering towards a target point.

use core::fmt;
use libm::atan2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Point2D, RobotPose, distance, normalize_degrees};

/// The heading and range from a robot pose to a target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    /// Absolute heading of the robot → target vector, degrees.
    pub desired_heading_deg: f64,
    /// How far the robot must turn, degrees within `(-180, 180]`. Positive turns left.
    pub heading_error_deg: f64,
    /// Euclidean distance between robot and target.
    pub distance: f64,
}

impl fmt::Display for Steering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(desired: {:.1}°, error: {:.1}°, distance: {:.1})",
            self.desired_heading_deg, self.heading_error_deg, self.distance
        )
    }
}

/// Computes the turn and distance needed to reach `target` from `pose`.
///
/// The desired heading is the four-quadrant angle of the vector from the
/// robot to the target. The heading error is the wrapped difference between
/// the desired heading and the current one.
pub fn steer(pose: &RobotPose, target: Point2D) -> Steering {
    let desired_heading_deg = atan2(target.y - pose.y, target.x - pose.x).to_degrees();
    let heading_error_deg = normalize_degrees(desired_heading_deg - pose.heading_deg);

    Steering {
        desired_heading_deg,
        heading_error_deg,
        distance: distance(pose.position(), target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_steer_diagonal_target() {
        let pose = RobotPose::new(0.0, 0.0, 0.0);
        let s = steer(&pose, Point2D::new(10.0, 10.0));
        assert!((s.desired_heading_deg - 45.0).abs() < EPSILON);
        assert!((s.heading_error_deg - 45.0).abs() < EPSILON);
        assert!((s.distance - 200.0_f64.sqrt()).abs() < EPSILON);
    }

    #[test]
    fn test_steer_wraps_across_the_back() {
        // Desired 170°, current -170° -> raw error 340° wrapped to -20°.
        let pose = RobotPose::new(0.0, 0.0, -170.0);
        let target = Point2D::new(170.0_f64.to_radians().cos() * 50.0, 170.0_f64.to_radians().sin() * 50.0);
        let s = steer(&pose, target);
        assert!((s.desired_heading_deg - 170.0).abs() < 1e-6);
        assert!((s.heading_error_deg - (-20.0)).abs() < 1e-6);
        assert!((s.distance - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_steer_already_aligned() {
        let pose = RobotPose::new(5.0, 5.0, 0.0);
        let s = steer(&pose, Point2D::new(25.0, 5.0));
        assert!(s.heading_error_deg.abs() < EPSILON);
        assert!((s.distance - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_steer_at_target() {
        let pose = RobotPose::new(5.0, 5.0, 30.0);
        let s = steer(&pose, Point2D::new(5.0, 5.0));
        assert!(s.distance.abs() < EPSILON);
        assert!((s.heading_error_deg - (-30.0)).abs() < EPSILON);
    }
}
