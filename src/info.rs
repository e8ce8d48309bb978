use crate::bmp;
use crate::bmp::SliceSource;
use crate::error::BmpError;

/// Info (DIB) header variant, identified by its size field.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfoHeaderKind {
    /// OS/2 `BITMAPCOREHEADER` (12 bytes, 16-bit unsigned dimensions).
    Core,
    /// Windows `BITMAPINFOHEADER` (40 bytes).
    Info,
    /// `BITMAPV2INFOHEADER` (52 bytes).
    V2,
    /// `BITMAPV3INFOHEADER` (56 bytes).
    V3,
    /// `BITMAPV4HEADER` (108 bytes).
    V4,
    /// `BITMAPV5HEADER` (124 bytes).
    V5,
}

impl InfoHeaderKind {
    pub fn from_size(size: u32) -> Option<Self> {
        Some(match size {
            12 => Self::Core,
            40 => Self::Info,
            52 => Self::V2,
            56 => Self::V3,
            108 => Self::V4,
            124 => Self::V5,
            _ => return None,
        })
    }

    /// Header size in bytes, as stored in the file.
    pub fn size(self) -> u32 {
        match self {
            Self::Core => 12,
            Self::Info => 40,
            Self::V2 => 52,
            Self::V3 => 56,
            Self::V4 => 108,
            Self::V5 => 124,
        }
    }
}

/// Header facts about a BMP file, read without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub header: InfoHeaderKind,
    /// Absolute offset of the first pixel row.
    pub data_offset: u32,
    /// File size as declared in the file header (not validated).
    pub file_size: u32,
}

impl BmpInfo {
    /// Parse and validate the headers of an in-memory BMP file.
    ///
    /// Fails exactly as decoding would, except that the pixel data itself
    /// is not checked for length.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        bmp::read_headers(&mut SliceSource::new(data))
    }

    /// Bytes per stored row, including padding to a 4-byte boundary.
    pub fn row_stride(&self) -> Option<usize> {
        bmp::row_stride(self.width)
    }

    /// Bytes of pixel data the headers promise, starting at `data_offset`.
    pub fn pixel_data_len(&self) -> Option<usize> {
        self.row_stride()?.checked_mul(self.height as usize)
    }
}
