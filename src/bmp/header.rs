//! BMP file and info header parsing.
//!
//! Fields are read one at a time, little-endian, in file order:
//!
//! ```text
//! file header (14 bytes)
//!   0  u16  signature "BM"
//!   2  u32  file size            (read, not validated)
//!   6  u32  reserved1/reserved2  (skipped)
//!  10  u32  pixel data offset
//! info header
//!  14  u32  info header size     (selects the layout below)
//!
//! BITMAPCOREHEADER (12)          BITMAPINFOHEADER family (40, 52, 56, 108, 124)
//!  18  u16  width                 18  i32  width
//!  20  u16  height                22  i32  height (positive = bottom-up)
//!  22  u16  planes (skipped)      26  u16  planes (skipped)
//!  24  u16  bits per pixel        28  u16  bits per pixel
//!                                 30  24 bytes compression, image size,
//!                                     resolution, palette counts (skipped)
//! ```
//!
//! Anything past the first 40 bytes of the larger variants is never read;
//! the decoder seeks straight to the pixel data offset.

use log::trace;

use super::io::ByteSource;
use crate::error::BmpError;
use crate::info::{BmpInfo, InfoHeaderKind};

pub(crate) const FILE_HEADER_LEN: u32 = 14;
pub(crate) const INFO_HEADER_LEN: u32 = 40;
pub(crate) const SIGNATURE: [u8; 2] = *b"BM";

/// Bytes of BITMAPINFOHEADER after bits-per-pixel that this codec ignores.
const INFO_TAIL_LEN: usize = 24;
const PLANES_LEN: usize = 2;
const RESERVED_LEN: usize = 4;

struct BmpFileHeader {
    file_size: u32,
    data_offset: u32,
}

struct BmpInfoHeader {
    kind: InfoHeaderKind,
    width: i32,
    height: i32,
    bits_per_pixel: u16,
}

fn read_file_header<S: ByteSource + ?Sized>(src: &mut S) -> Result<BmpFileHeader, BmpError> {
    let signature: [u8; 2] = src.read_fixed_bytes()?;
    if signature != SIGNATURE {
        return Err(BmpError::BadSignature);
    }
    let file_size = src.read_u32_le()?;
    src.skip(RESERVED_LEN)?;
    let data_offset = src.read_u32_le()?;
    Ok(BmpFileHeader {
        file_size,
        data_offset,
    })
}

fn read_info_header<S: ByteSource + ?Sized>(src: &mut S) -> Result<BmpInfoHeader, BmpError> {
    let size = src.read_u32_le()?;
    let kind = InfoHeaderKind::from_size(size).ok_or(BmpError::UnsupportedHeader(size))?;

    let (width, height, bits_per_pixel);
    match kind {
        InfoHeaderKind::Core => {
            width = i32::from(src.read_u16_le()?);
            height = i32::from(src.read_u16_le()?);
            src.skip(PLANES_LEN)?;
            bits_per_pixel = src.read_u16_le()?;
        }
        _ => {
            width = src.read_i32_le()?;
            height = src.read_i32_le()?;
            src.skip(PLANES_LEN)?;
            bits_per_pixel = src.read_u16_le()?;
            src.skip(INFO_TAIL_LEN)?;
        }
    }

    Ok(BmpInfoHeader {
        kind,
        width,
        height,
        bits_per_pixel,
    })
}

/// Read and validate both headers. Leaves `src` just past the last parsed
/// field; callers seek to [`BmpInfo::data_offset`] before reading pixels.
pub(crate) fn read_headers<S: ByteSource + ?Sized>(src: &mut S) -> Result<BmpInfo, BmpError> {
    let file = read_file_header(src)?;
    let info = read_info_header(src)?;

    trace!("BMP file size field: {}", file.file_size);
    trace!("BMP data offset: {}", file.data_offset);
    trace!("BMP info header: {:?}", info.kind);
    trace!("Width: {}", info.width);
    trace!("Height: {}", info.height);
    trace!("Bit depth: {}", info.bits_per_pixel);

    if info.width <= 0 {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "BMP width must be positive, got {}",
            info.width
        )));
    }
    if info.height <= 0 {
        return Err(BmpError::UnsupportedOrientation(info.height));
    }
    if info.bits_per_pixel != 24 {
        return Err(BmpError::UnsupportedDepth(info.bits_per_pixel));
    }

    let headers_end = FILE_HEADER_LEN + info.kind.size();
    if file.data_offset < headers_end {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "pixel data offset {} points inside the {headers_end}-byte headers",
            file.data_offset
        )));
    }

    Ok(BmpInfo {
        width: info.width as u32,
        height: info.height as u32,
        bits_per_pixel: info.bits_per_pixel,
        header: info.kind,
        data_offset: file.data_offset,
        file_size: file.file_size,
    })
}
