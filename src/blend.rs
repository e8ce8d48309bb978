//! Min/max opacity blend of two equally-sized grids.
//!
//! Each channel is interpolated from the smaller of the two source values
//! (at alpha 0) to the larger (at alpha 255). Which grid is background and
//! which is foreground does not affect the result; this is not "over"
//! compositing.

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::{Color, PixelGrid};

/// `round(min(a, b) + |a - b| * alpha / 255)`, rounding halves up.
///
/// `|a - b| * alpha` is an integer and 255 is odd, so the quotient is never
/// exactly `n + 0.5`; adding 127 before the integer division gives the
/// nearest integer.
pub fn blend_channel(a: u8, b: u8, alpha: u8) -> u8 {
    let lo = a.min(b);
    let diff = u16::from(a.abs_diff(b));
    // lo + diff == max(a, b), so the sum never exceeds 255.
    lo + mul_div255(diff, u16::from(alpha))
}

/// [`blend_channel`] applied to red, green and blue.
pub fn blend_color(a: Color, b: Color, alpha: u8) -> Color {
    Color {
        red: blend_channel(a.red, b.red, alpha),
        green: blend_channel(a.green, b.green, alpha),
        blue: blend_channel(a.blue, b.blue, alpha),
    }
}

/// Blend two grids of identical dimensions into a new grid.
pub fn combine(
    background: &PixelGrid,
    foreground: &PixelGrid,
    alpha: u8,
) -> Result<PixelGrid, BmpError> {
    if background.dimensions() != foreground.dimensions() {
        return Err(BmpError::DimensionMismatch {
            background: background.dimensions(),
            foreground: foreground.dimensions(),
        });
    }

    let pixels: Vec<Color> = background
        .pixels()
        .iter()
        .zip(foreground.pixels())
        .map(|(&a, &b)| blend_color(a, b, alpha))
        .collect();

    PixelGrid::from_pixels(background.width(), background.height(), pixels)
}

/// Map an opacity in `[0, 1]` to an 8-bit alpha, truncating `opacity * 255`.
///
/// Out-of-range values clamp; NaN maps to 0.
pub fn alpha_from_opacity(opacity: f32) -> u8 {
    // `as` saturates and sends NaN to 0.
    (opacity.clamp(0.0, 1.0) * 255.0) as u8
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
