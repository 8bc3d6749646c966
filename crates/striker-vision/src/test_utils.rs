//! Synthetic frames for unit tests.

use image::{Rgb, RgbImage};

pub(crate) const RED: Rgb<u8> = Rgb([230, 20, 20]);
pub(crate) const BLUE: Rgb<u8> = Rgb([20, 20, 230]);
pub(crate) const YELLOW: Rgb<u8> = Rgb([240, 220, 20]);

/// Paint a `w` × `h` rectangle with its top-left corner at `(x, y)`.
pub(crate) fn fill_rect(image: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            image.put_pixel(px, py, color);
        }
    }
}
