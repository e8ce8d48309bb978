use alloc::vec;
use alloc::vec::Vec;
use core::slice::ChunksExact;

use crate::error::BmpError;

/// An opaque 8-bit-per-channel color.
///
/// BMP stores these as blue, green, red byte triplets; [`Color::to_bgr`] and
/// [`Color::from_bgr`] convert to and from that order. There is no reserved
/// fourth byte: 24-bit rows never store one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from BMP's on-disk `[blue, green, red]` order.
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self::new(bgr[2], bgr[1], bgr[0])
    }

    /// Channels in BMP's on-disk `[blue, green, red]` order.
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }
}

/// A `width × height` grid of colors stored row-major, top row first.
///
/// `(x, y)` lives at `y * width + x`, with `y = 0` the visual top of the image.
/// Both dimensions are always non-zero and the pixel count always equals
/// `width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// A grid filled with black.
    pub fn new(width: u32, height: u32) -> Result<Self, BmpError> {
        Self::filled(width, height, Color::BLACK)
    }

    /// A grid with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, BmpError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![color; len],
        })
    }

    /// Wrap an existing row-major (top row first) pixel vector.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, BmpError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BmpError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Color> {
        let i = self.index(x, y)?;
        Some(&mut self.pixels[i])
    }

    /// Row `y`, top row first.
    pub fn row(&self, y: u32) -> Option<&[Color]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.pixels[start..start + w])
    }

    /// Rows from visual top to visual bottom.
    pub fn rows(&self) -> ChunksExact<'_, Color> {
        self.pixels.chunks_exact(self.width as usize)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Copy out as typed [`rgb::RGB8`] pixels.
    #[cfg(feature = "rgb")]
    pub fn to_rgb8(&self) -> Vec<rgb::RGB8> {
        self.pixels.iter().map(|&c| c.into()).collect()
    }

    /// Build a grid from typed [`rgb::RGB8`] pixels, top row first.
    #[cfg(feature = "rgb")]
    pub fn from_rgb8(width: u32, height: u32, pixels: &[rgb::RGB8]) -> Result<Self, BmpError> {
        Self::from_pixels(width, height, pixels.iter().map(|&p| p.into()).collect())
    }

    /// Convert to an [`imgref::ImgVec`] of [`rgb::RGB8`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        imgref::ImgVec::new(
            self.to_rgb8(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// `width * height`, rejecting zero and overflowing dimensions.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        })
}

#[cfg(feature = "rgb")]
impl From<Color> for rgb::RGB8 {
    fn from(c: Color) -> Self {
        rgb::RGB8::new(c.red, c.green, c.blue)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Color {
    fn from(p: rgb::RGB8) -> Self {
        Color::new(p.r, p.g, p.b)
    }
}
