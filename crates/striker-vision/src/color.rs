//! Per-channel color thresholds.

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::error::VisionError;

/// Mask value for pixels inside a [`ColorRange`].
pub const MASK_ON: u8 = 255;
/// Mask value for pixels outside a [`ColorRange`].
pub const MASK_OFF: u8 = 0;

/// Inclusive lower/upper bounds on each RGB channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    lower: [u8; 3],
    upper: [u8; 3],
}

impl ColorRange {
    /// Creates a new range from RGB-ordered bounds.
    ///
    /// # Errors
    ///
    /// Returns `Err(VisionError::InvalidColorRange)` if any lower bound is above its upper bound.
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self, VisionError> {
        if lower.iter().zip(upper.iter()).any(|(lo, hi)| lo > hi) {
            return Err(VisionError::InvalidColorRange(
                "lower bound exceeds upper bound",
            ));
        }
        Ok(ColorRange { lower, upper })
    }

    /// Creates a new range from BGR-ordered bounds.
    ///
    /// Thresholds are often tuned against BGR camera frames; this reorders them
    /// so they apply to the RGB images this crate works on.
    ///
    /// # Errors
    ///
    /// Returns `Err(VisionError::InvalidColorRange)` if any lower bound is above its upper bound.
    pub fn from_bgr(lower: [u8; 3], upper: [u8; 3]) -> Result<Self, VisionError> {
        Self::new(
            [lower[2], lower[1], lower[0]],
            [upper[2], upper[1], upper[0]],
        )
    }

    /// Lower RGB bound.
    pub fn lower(&self) -> [u8; 3] {
        self.lower
    }

    /// Upper RGB bound.
    pub fn upper(&self) -> [u8; 3] {
        self.upper
    }

    /// Whether every channel of `pixel` lies within the range.
    pub fn contains(&self, pixel: &Rgb<u8>) -> bool {
        (0..3).all(|c| self.lower[c] <= pixel[c] && pixel[c] <= self.upper[c])
    }

    /// Thresholds `image` into a binary mask: [`MASK_ON`] where the pixel is in range,
    /// [`MASK_OFF`] elsewhere.
    pub fn mask(&self, image: &RgbImage) -> GrayImage {
        GrayImage::from_fn(image.width(), image.height(), |x, y| {
            if self.contains(image.get_pixel(x, y)) {
                Luma([MASK_ON])
            } else {
                Luma([MASK_OFF])
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range() {
        assert!(matches!(
            ColorRange::new([10, 0, 0], [5, 255, 255]),
            Err(VisionError::InvalidColorRange(_))
        ));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = ColorRange::new([100, 0, 0], [200, 50, 50]).unwrap();
        assert!(range.contains(&Rgb([100, 0, 0])));
        assert!(range.contains(&Rgb([200, 50, 50])));
        assert!(!range.contains(&Rgb([201, 50, 50])));
        assert!(!range.contains(&Rgb([150, 51, 0])));
    }

    #[test]
    fn test_from_bgr_swaps_channels() {
        let range = ColorRange::from_bgr([0, 10, 200], [20, 30, 255]).unwrap();
        assert_eq!(range.lower(), [200, 10, 0]);
        assert_eq!(range.upper(), [255, 30, 20]);
        assert!(range.contains(&Rgb([230, 20, 10])));
    }

    #[test]
    fn test_mask() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(1, 0, Rgb([255, 0, 0]));
        image.put_pixel(2, 1, Rgb([250, 5, 5]));
        let range = ColorRange::new([200, 0, 0], [255, 10, 10]).unwrap();

        let mask = range.mask(&image);
        assert_eq!(mask.dimensions(), (3, 2));
        assert_eq!(mask.get_pixel(1, 0)[0], MASK_ON);
        assert_eq!(mask.get_pixel(2, 1)[0], MASK_ON);
        assert_eq!(mask.get_pixel(0, 0)[0], MASK_OFF);
        assert_eq!(mask.pixels().filter(|p| p[0] == MASK_ON).count(), 2);
    }
}
