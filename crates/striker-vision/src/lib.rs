#![warn(missing_docs)]
#![doc = "Camera-side helpers for a vision-guided soccer robot."]
#![doc = ""]
#![doc = "This crate thresholds RGB frames against color ranges, extracts the centroids of"]
#![doc = "connected marker regions, locates the robot from a front/back marker pair (in a frame"]
#![doc = "or in a label grid) and rectifies frames with a four-point perspective warp."]

pub mod color;
pub mod error;
pub mod grid;
pub mod localize;
pub mod markers;
pub mod warp;

#[cfg(test)]
mod test_utils;

pub use color::ColorRange;
pub use error::VisionError;
pub use grid::{GridCell, LabelGrid};
pub use imageproc::region_labelling::Connectivity;
pub use localize::{locate_marker, locate_robot_in_grid, locate_robot_in_image};
pub use markers::{Blob, BoundingBox, DetectorConfig, blobs_in_mask, detect_blobs, detect_markers, detect_markers_with};
pub use warp::{FieldWarp, perspective_warp};
