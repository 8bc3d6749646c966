#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library of planar geometry helpers for a vision-guided soccer robot."]
#![doc = ""]
#![doc = "This crate provides points and poses in image coordinates, pose estimation from a"]
#![doc = "front/back marker pair, the shooting-point construction and steering computations."]
#![doc = ""]
#![doc = "Coordinates are always `(x, y)` with `x` the image column and `y` the image row."]
#![doc = "Angles are in degrees. Missing inputs are `None`, never a sentinel value."]

use core::fmt;
use libm::{atan2, fabs, fmod, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod shooting;
pub mod steering;

pub use shooting::shooting_point;
pub use steering::{Steering, steer};

/// A point `(x, y)` in image coordinates (pixels).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    /// Column coordinate.
    pub x: f64,
    /// Row coordinate.
    pub y: f64,
}

impl Point2D {
    /// Construct a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point2D) -> f64 {
        distance(*self, other)
    }

    /// Component-wise average of `self` and `other`.
    pub fn midpoint(&self, other: Point2D) -> Point2D {
        midpoint(*self, other)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// A robot pose `(x, y, heading)` in image coordinates.
///
/// The position is the back marker; the heading points from the back marker
/// towards the front marker, in degrees within `(-180, 180]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotPose {
    /// Column coordinate of the robot reference point.
    pub x: f64,
    /// Row coordinate of the robot reference point.
    pub y: f64,
    /// Heading in degrees, `(-180, 180]`.
    pub heading_deg: f64,
}

impl RobotPose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: Column coordinate of the robot.
    /// * `y`: Row coordinate of the robot.
    /// * `heading_deg`: Heading in degrees.
    pub const fn new(x: f64, y: f64, heading_deg: f64) -> Self {
        RobotPose { x, y, heading_deg }
    }

    /// The position part of the pose.
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl fmt::Display for RobotPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.1}, y: {:.1}, θ: {:.1}°)", self.x, self.y, self.heading_deg)
    }
}

/// Estimates the robot pose from its front and back marker positions.
///
/// The position is the back marker and the heading is the four-quadrant angle
/// of the vector back → front, in degrees within `(-180, 180]`. Coincident
/// markers give a heading of `0`.
///
/// # Returns
///
/// `None` when either marker was not found.
pub fn estimate_pose(front: Option<Point2D>, back: Option<Point2D>) -> Option<RobotPose> {
    let (front, back) = (front?, back?);
    // atan2 yields -180 for a -0.0 rise; wrap onto the half-open range.
    let heading = normalize_degrees(atan2(front.y - back.y, front.x - back.x).to_degrees());
    Some(RobotPose::new(back.x, back.y, heading))
}

/// Wraps an angle in degrees into `(-180, 180]`.
///
/// Uses the modular form `((angle + 180) mod 360) - 180` with a floored
/// modulo, then maps `-180` onto `180`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let mut wrapped = fmod(angle + 180.0, 360.0);
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    let wrapped = wrapped - 180.0;
    if wrapped <= -180.0 { 180.0 } else { wrapped }
}

/// Component-wise average of two points.
pub fn midpoint(a: Point2D, b: Point2D) -> Point2D {
    Point2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Euclidean distance between two points.
pub fn distance(a: Point2D, b: Point2D) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    sqrt(dx * dx + dy * dy)
}

/// Returns `items[index]`, or `default` when `index` is out of range.
pub fn get_or<T: Clone>(items: &[T], index: usize, default: T) -> T {
    items.get(index).cloned().unwrap_or(default)
}

/// Absolute difference between two angles in degrees, after wrapping.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    fabs(normalize_degrees(a - b))
}
