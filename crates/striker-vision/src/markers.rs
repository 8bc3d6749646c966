//! Colored-marker detection.
//!
//! An image is thresholded against a [`ColorRange`], the foreground is split
//! into connected regions, and each region is summarized by its zeroth and
//! first-order moments. The centroid is `(m10 / m00, m01 / m00)`.

use image::{GrayImage, Luma, RgbImage};
use imageproc::region_labelling::{Connectivity, connected_components};
use striker_geometry::Point2D;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ColorRange, MASK_OFF};

/// Tunables for region extraction.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Pixel adjacency used to join foreground pixels into regions.
    pub connectivity: Connectivity,
    /// Regions with fewer pixels than this are treated as noise.
    pub min_area: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            connectivity: Connectivity::Eight,
            min_area: 1,
        }
    }
}

/// Inclusive pixel bounds of a region.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Leftmost column.
    pub min_x: u32,
    /// Topmost row.
    pub min_y: u32,
    /// Rightmost column.
    pub max_x: u32,
    /// Bottom row.
    pub max_y: u32,
}

impl BoundingBox {
    /// Whether `p` lies inside the box (edges included).
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min_x as f64
            && p.x <= self.max_x as f64
            && p.y >= self.min_y as f64
            && p.y <= self.max_y as f64
    }
}

/// A connected foreground region.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    /// Number of pixels (the zeroth moment).
    pub area: u32,
    /// Tight bounds of the region.
    pub bounding_box: BoundingBox,
    /// Area-weighted mean pixel coordinate.
    pub centroid: Point2D,
}

/// Running moments for one region.
struct Moments {
    m00: f64,
    m10: f64,
    m01: f64,
    bounds: BoundingBox,
}

impl Moments {
    fn start(x: u32, y: u32) -> Self {
        Moments {
            m00: 0.0,
            m10: 0.0,
            m01: 0.0,
            bounds: BoundingBox { min_x: x, min_y: y, max_x: x, max_y: y },
        }
    }

    fn add(&mut self, x: u32, y: u32) {
        self.m00 += 1.0;
        self.m10 += x as f64;
        self.m01 += y as f64;
        self.bounds.min_x = self.bounds.min_x.min(x);
        self.bounds.min_y = self.bounds.min_y.min(y);
        self.bounds.max_x = self.bounds.max_x.max(x);
        self.bounds.max_y = self.bounds.max_y.max(y);
    }

    fn into_blob(self) -> Option<Blob> {
        // Zero-area region: no centroid.
        if self.m00 == 0.0 {
            return None;
        }
        Some(Blob {
            area: self.m00 as u32,
            bounding_box: self.bounds,
            centroid: Point2D::new(self.m10 / self.m00, self.m01 / self.m00),
        })
    }
}

/// Extracts every connected foreground region of a binary mask.
///
/// Any non-zero mask pixel is foreground. Regions are returned in raster
/// order of their first pixel; regions smaller than `config.min_area` are dropped.
pub fn blobs_in_mask(mask: &GrayImage, config: &DetectorConfig) -> Vec<Blob> {
    let labels = connected_components(mask, config.connectivity, Luma([MASK_OFF]));

    let mut regions: Vec<Option<Moments>> = Vec::new();
    let mut first_seen: Vec<usize> = Vec::new();

    for (x, y, label) in labels.enumerate_pixels() {
        let label = label[0] as usize;
        if label == 0 {
            continue;
        }
        if label >= regions.len() {
            regions.resize_with(label + 1, || None);
        }
        regions[label]
            .get_or_insert_with(|| {
                first_seen.push(label);
                Moments::start(x, y)
            })
            .add(x, y);
    }

    let found = first_seen.len();
    let blobs: Vec<Blob> = first_seen
        .into_iter()
        .filter_map(|label| regions[label].take())
        .filter_map(Moments::into_blob)
        .filter(|blob| blob.area >= config.min_area)
        .collect();

    debug!(regions = found, kept = blobs.len(), min_area = config.min_area, "Extracted mask regions");
    blobs
}

/// Detects every region of `image` whose pixels fall inside `range`.
pub fn detect_blobs(image: &RgbImage, range: &ColorRange, config: &DetectorConfig) -> Vec<Blob> {
    blobs_in_mask(&range.mask(image), config)
}

/// Centroids `(x, y)` of every region of `image` inside `range`, using the default configuration.
///
/// Returns an empty list when no pixel is in range.
pub fn detect_markers(image: &RgbImage, range: &ColorRange) -> Vec<Point2D> {
    detect_markers_with(image, range, &DetectorConfig::default())
}

/// Centroids `(x, y)` of every region of `image` inside `range`.
pub fn detect_markers_with(image: &RgbImage, range: &ColorRange, config: &DetectorConfig) -> Vec<Point2D> {
    detect_blobs(image, range, config)
        .into_iter()
        .map(|blob| blob.centroid)
        .collect()
}
