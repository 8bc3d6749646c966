//! Perspective correction of camera frames.
//!
//! The camera sees the pitch at an angle. Four pitch landmarks in the frame and
//! their positions in a top-down view define a homography; frames are
//! resampled through it so distances and angles are measured on the pitch plane.

use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use striker_geometry::Point2D;

use crate::error::VisionError;

/// Fill for output pixels that map outside the source frame.
const OUTSIDE: Rgb<u8> = Rgb([0, 0, 0]);

/// Smallest doubled triangle area accepted between any three control points.
const MIN_TRIANGLE_AREA: f64 = 1e-6;

/// A projective mapping from camera pixels to a rectified pitch view.
#[derive(Debug, Clone, Copy)]
pub struct FieldWarp {
    projection: Projection,
}

impl FieldWarp {
    /// Computes the homography taking each `src[i]` onto `dst[i]`.
    ///
    /// # Errors
    ///
    /// Returns `Err(VisionError::DegenerateQuad)` if either quadrilateral has
    /// three collinear (or repeated) corners, or the system has no solution.
    pub fn from_quads(src: [Point2D; 4], dst: [Point2D; 4]) -> Result<Self, VisionError> {
        if is_degenerate(&src) {
            return Err(VisionError::DegenerateQuad("source corners are collinear"));
        }
        if is_degenerate(&dst) {
            return Err(VisionError::DegenerateQuad("destination corners are collinear"));
        }

        let projection = Projection::from_control_points(src.map(to_f32), dst.map(to_f32))
            .ok_or(VisionError::DegenerateQuad("no projective solution"))?;
        Ok(FieldWarp { projection })
    }

    /// Projects a single camera point into the rectified view.
    pub fn map_point(&self, p: Point2D) -> Point2D {
        let (x, y) = self.projection * to_f32(p);
        Point2D::new(x as f64, y as f64)
    }

    /// Resamples `image` into a `width` × `height` rectified frame using bilinear
    /// interpolation. Pixels with no source are black.
    ///
    /// # Errors
    ///
    /// Returns `Err(VisionError::InvalidDimensions)` if `width` or `height` is zero.
    pub fn warp(&self, image: &RgbImage, width: u32, height: u32) -> Result<RgbImage, VisionError> {
        if width == 0 || height == 0 {
            return Err(VisionError::InvalidDimensions("Output width and height must be non-zero"));
        }
        let mut out = RgbImage::new(width, height);
        warp_into(image, &self.projection, Interpolation::Bilinear, OUTSIDE, &mut out);
        Ok(out)
    }
}

/// One-shot perspective warp: fit the homography `src → dst` and resample `image` through it.
pub fn perspective_warp(
    image: &RgbImage,
    src: [Point2D; 4],
    dst: [Point2D; 4],
    width: u32,
    height: u32,
) -> Result<RgbImage, VisionError> {
    FieldWarp::from_quads(src, dst)?.warp(image, width, height)
}

fn to_f32(p: Point2D) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn is_degenerate(quad: &[Point2D; 4]) -> bool {
    const TRIPLES: [(usize, usize, usize); 4] = [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)];
    TRIPLES.iter().any(|&(a, b, c)| {
        let (p, q, r) = (quad[a], quad[b], quad[c]);
        let cross = (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
        !(cross.abs() >= MIN_TRIANGLE_AREA)
    })
}
