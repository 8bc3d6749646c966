//! Robot localization from a front/back marker pair.
//!
//! Markers can come from a label grid painted by an upstream stage or
//! straight from a camera frame. Both paths feed [`estimate_pose`].

use image::RgbImage;
use striker_geometry::{Point2D, RobotPose, estimate_pose};
use tracing::debug;

use crate::color::ColorRange;
use crate::grid::LabelGrid;
use crate::markers::{DetectorConfig, detect_blobs};

/// Locates the robot in a label grid.
///
/// The front and back markers are the first cells (row-major) holding
/// `front_label` and `back_label`. Cells map to points with `x = col`, `y = row`.
///
/// # Returns
///
/// `None` when either label is missing from the grid.
pub fn locate_robot_in_grid(grid: &LabelGrid, front_label: i32, back_label: i32) -> Option<RobotPose> {
    let front = grid.find_first(front_label).map(Point2D::from);
    let back = grid.find_first(back_label).map(Point2D::from);
    if front.is_none() || back.is_none() {
        debug!(front_label, back_label, ?front, ?back, "Robot markers missing from label grid");
    }
    estimate_pose(front, back)
}

/// Centroid of the first region of `image` inside `range`, if any.
pub fn locate_marker(image: &RgbImage, range: &ColorRange, config: &DetectorConfig) -> Option<Point2D> {
    detect_blobs(image, range, config)
        .first()
        .map(|blob| blob.centroid)
}

/// Locates the robot in a camera frame from its two colored markers.
///
/// When a color matches several regions the first in raster order is used.
///
/// # Returns
///
/// `None` when either marker color is not visible.
pub fn locate_robot_in_image(
    image: &RgbImage,
    front: &ColorRange,
    back: &ColorRange,
    config: &DetectorConfig,
) -> Option<RobotPose> {
    let front_marker = locate_marker(image, front, config);
    let back_marker = locate_marker(image, back, config);
    if front_marker.is_none() || back_marker.is_none() {
        debug!(?front_marker, ?back_marker, "Robot markers not visible");
    }
    estimate_pose(front_marker, back_marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridCell;
    use crate::test_utils::{BLUE, RED, fill_rect};

    const FRONT: i32 = 3;
    const BACK: i32 = 4;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_grid_pose_facing_along_columns() {
        let mut grid = LabelGrid::new(20, 20, 0).unwrap();
        grid.set(GridCell::new(5, 12), FRONT).unwrap();
        grid.set(GridCell::new(5, 2), BACK).unwrap();

        let pose = locate_robot_in_grid(&grid, FRONT, BACK).unwrap();
        assert_eq!((pose.x, pose.y), (2.0, 5.0));
        assert!(pose.heading_deg.abs() < EPSILON);
    }

    #[test]
    fn test_grid_pose_facing_down_rows() {
        let mut grid = LabelGrid::new(20, 20, 0).unwrap();
        grid.set(GridCell::new(15, 4), FRONT).unwrap();
        grid.set(GridCell::new(5, 4), BACK).unwrap();

        let pose = locate_robot_in_grid(&grid, FRONT, BACK).unwrap();
        assert!((pose.heading_deg - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_grid_missing_marker() {
        let mut grid = LabelGrid::new(5, 5, 0).unwrap();
        grid.set(GridCell::new(1, 1), FRONT).unwrap();
        assert_eq!(locate_robot_in_grid(&grid, FRONT, BACK), None);
    }

    #[test]
    fn test_image_pose() {
        let mut image = RgbImage::new(80, 60);
        fill_rect(&mut image, 10, 10, 4, 4, BLUE); // back, centroid (11.5, 11.5)
        fill_rect(&mut image, 10, 40, 4, 4, RED); // front, centroid (11.5, 41.5)

        let red = ColorRange::new([200, 0, 0], [255, 60, 60]).unwrap();
        let blue = ColorRange::new([0, 0, 200], [60, 60, 255]).unwrap();
        let pose = locate_robot_in_image(&image, &red, &blue, &DetectorConfig::default()).unwrap();

        assert_eq!(pose.position(), Point2D::new(11.5, 11.5));
        assert!((pose.heading_deg - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_image_missing_marker() {
        let mut image = RgbImage::new(30, 30);
        fill_rect(&mut image, 10, 10, 4, 4, BLUE);

        let red = ColorRange::new([200, 0, 0], [255, 60, 60]).unwrap();
        let blue = ColorRange::new([0, 0, 200], [60, 60, 255]).unwrap();
        assert_eq!(locate_robot_in_image(&image, &red, &blue, &DetectorConfig::default()), None);
    }
}
