//! BMP encoder: uncompressed 24-bit BGR with a 40-byte info header.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use log::debug;

use super::header::{FILE_HEADER_LEN, INFO_HEADER_LEN, SIGNATURE};
use super::io::ByteSink;
use super::row_stride;
use crate::error::BmpError;
use crate::pixel::PixelGrid;

const HEADERS_LEN: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// Total encoded size of `grid` in bytes.
pub(crate) fn encoded_len(grid: &PixelGrid) -> Result<usize, BmpError> {
    let layout = Layout::of(grid)?;
    Ok(layout.file_size as usize)
}

struct Layout {
    stride: usize,
    file_size: u32,
}

impl Layout {
    fn of(grid: &PixelGrid) -> Result<Self, BmpError> {
        let (width, height) = grid.dimensions();
        let too_large = || BmpError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        };
        // Both are stored as positive i32.
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(too_large());
        }
        let stride = row_stride(width).ok_or_else(too_large)?;
        let file_size = (stride as u64)
            .checked_mul(u64::from(height))
            .and_then(|px| px.checked_add(u64::from(HEADERS_LEN)))
            .and_then(|total| u32::try_from(total).ok())
            .ok_or_else(too_large)?;
        Ok(Self { stride, file_size })
    }
}

/// Write `grid` to `sink` as a 24-bit bottom-up BMP.
pub(crate) fn encode_bmp<K: ByteSink + ?Sized>(
    grid: &PixelGrid,
    sink: &mut K,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let layout = Layout::of(grid)?;
    stop.check()?;

    debug!(
        "encoding {}x{} BMP, stride {}, {} bytes",
        grid.width(),
        grid.height(),
        layout.stride,
        layout.file_size
    );

    sink.write_all(&bmp_header(grid.width(), grid.height(), layout.file_size))?;

    let w = grid.width() as usize;
    let mut row = vec![0u8; layout.stride];
    for (row_idx, pixels) in grid.pixels().rchunks_exact(w).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (out, color) in row.chunks_exact_mut(3).zip(pixels) {
            out.copy_from_slice(&color.to_bgr());
        }
        // Padding bytes past `w * 3` stay zero.
        sink.write_all(&row)?;
    }

    sink.flush()
}

fn bmp_header(width: u32, height: u32, file_size: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADERS_LEN as usize);

    // File header (14 bytes)
    out.extend_from_slice(&SIGNATURE);
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&HEADERS_LEN.to_le_bytes()); // data offset

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&0u32.to_le_bytes()); // image size
    out.extend_from_slice(&0u32.to_le_bytes()); // h resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
    out
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use enough::{StopReason, Unstoppable};

    use super::*;
    use crate::pixel::Color;

    fn encode(grid: &PixelGrid) -> Vec<u8> {
        let mut out = Vec::new();
        encode_bmp(grid, &mut out, &Unstoppable).unwrap();
        out
    }

    fn u32_at(data: &[u8], off: usize) -> u32 {
        u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
    }

    fn u16_at(data: &[u8], off: usize) -> u16 {
        u16::from_le_bytes([data[off], data[off + 1]])
    }

    #[test]
    fn header_fields() {
        let grid = PixelGrid::new(3, 2).unwrap();
        let out = encode(&grid);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(u32_at(&out, 2), 54 + 12 * 2);
        assert_eq!(u32_at(&out, 6), 0);
        assert_eq!(u32_at(&out, 10), 54);
        assert_eq!(u32_at(&out, 14), 40);
        assert_eq!(u32_at(&out, 18), 3);
        assert_eq!(u32_at(&out, 22), 2);
        assert_eq!(u16_at(&out, 26), 1);
        assert_eq!(u16_at(&out, 28), 24);
        assert!(out[30..54].iter().all(|&b| b == 0));
        assert_eq!(out.len(), u32_at(&out, 2) as usize);
        assert_eq!(encoded_len(&grid).unwrap(), out.len());
    }

    #[test]
    fn width_3_writes_3_zero_padding_bytes() {
        let grid = PixelGrid::filled(3, 1, Color::new(1, 2, 3)).unwrap();
        let out = encode(&grid);
        assert_eq!(&out[54..], &[3, 2, 1, 3, 2, 1, 3, 2, 1, 0, 0, 0]);
    }

    #[test]
    fn width_4_writes_no_padding() {
        let grid = PixelGrid::filled(4, 1, Color::WHITE).unwrap();
        let out = encode(&grid);
        assert_eq!(out.len(), 54 + 12);
        assert!(out[54..].iter().all(|&b| b == 255));
    }

    #[test]
    fn rows_written_bottom_first() {
        let grid = PixelGrid::from_pixels(
            1,
            2,
            vec![Color::new(10, 20, 30), Color::new(40, 50, 60)], // top, bottom
        )
        .unwrap();
        let out = encode(&grid);
        assert_eq!(&out[54..], &[60, 50, 40, 0, 30, 20, 10, 0]);
    }

    /// Passes `budget` checks, then cancels. Counts every check.
    struct TripAfter {
        budget: usize,
        calls: AtomicUsize,
    }

    impl Stop for TripAfter {
        fn check(&self) -> Result<(), StopReason> {
            if self.calls.fetch_add(1, Ordering::Relaxed) >= self.budget {
                Err(StopReason::Cancelled)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn stop_checked_up_front_then_every_16_rows() {
        let grid = PixelGrid::new(1, 40).unwrap();
        let stop = TripAfter {
            budget: usize::MAX,
            calls: AtomicUsize::new(0),
        };
        let mut out = Vec::new();
        encode_bmp(&grid, &mut out, &stop).unwrap();
        assert_eq!(stop.calls.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn cancelled_encode_writes_nothing() {
        let grid = PixelGrid::new(2, 2).unwrap();
        let stop = TripAfter {
            budget: 0,
            calls: AtomicUsize::new(0),
        };
        let mut out = Vec::new();
        let err = encode_bmp(&grid, &mut out, &stop);
        assert!(matches!(err, Err(BmpError::Cancelled(StopReason::Cancelled))));
        assert!(out.is_empty());
    }

    #[test]
    fn cancelled_at_row_16_keeps_written_rows() {
        let grid = PixelGrid::new(1, 40).unwrap();
        let stop = TripAfter {
            budget: 2,
            calls: AtomicUsize::new(0),
        };
        let mut out = Vec::new();
        let err = encode_bmp(&grid, &mut out, &stop);
        assert!(matches!(err, Err(BmpError::Cancelled(_))));
        assert_eq!(out.len(), 54 + 16 * 4);
    }
}
