//! 24-bit BMP pixel decoder.

use alloc::vec;

use enough::Stop;
use log::trace;

use super::header::read_headers;
use super::io::ByteSource;
use super::row_stride;
use crate::error::BmpError;
use crate::info::BmpInfo;
use crate::limits::Limits;
use crate::pixel::{Color, PixelGrid};

/// Decode a whole BMP from `src`, which must be positioned at the signature.
pub(crate) fn decode_bmp<S: ByteSource + ?Sized>(
    src: &mut S,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BmpError> {
    let info = read_headers(src)?;
    if let Some(limits) = limits {
        limits.check_info(&info)?;
    }
    stop.check()?;
    decode_pixels(src, &info, stop)
}

fn too_large(info: &BmpInfo) -> BmpError {
    BmpError::DimensionsTooLarge {
        width: u64::from(info.width),
        height: u64::from(info.height),
    }
}

/// Read `info.height` stored rows starting at `info.data_offset`.
///
/// Stored row 0 is the visual bottom, so it lands in the last grid row.
fn decode_pixels<S: ByteSource + ?Sized>(
    src: &mut S,
    info: &BmpInfo,
    stop: &dyn Stop,
) -> Result<PixelGrid, BmpError> {
    let w = info.width as usize;
    let h = info.height as usize;
    let stride = row_stride(info.width).ok_or(too_large(info))?;
    let pixel_bytes = info.pixel_data_len().ok_or(too_large(info))?;
    let pixel_count = w.checked_mul(h).ok_or(too_large(info))?;

    // Refuse to allocate a grid the source cannot fill.
    if let Some(total) = src.total_len()? {
        let needed = u64::from(info.data_offset).saturating_add(pixel_bytes as u64);
        if needed > total {
            trace!("BMP needs {needed} bytes, source has {total}");
            return Err(BmpError::Truncated);
        }
    }

    src.seek_to(u64::from(info.data_offset))?;

    let mut pixels = vec![Color::BLACK; pixel_count];
    let mut row = vec![0u8; stride];

    for (row_idx, out) in pixels.rchunks_exact_mut(w).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        // Includes the 0..=3 padding bytes at the end of the row.
        src.read_exact(&mut row)?;
        for (dst, bgr) in out.iter_mut().zip(row.chunks_exact(3)) {
            *dst = Color::from_bgr([bgr[0], bgr[1], bgr[2]]);
        }
    }

    PixelGrid::from_pixels(info.width, info.height, pixels)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use enough::{StopReason, Unstoppable};

    use super::*;
    use crate::bmp::SliceSource;

    /// Hand-built file: 40-byte info header, `rows` given bottom row first,
    /// each already including its padding.
    fn file(width: i32, height: i32, data_offset: u32, rows: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&data_offset.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&[0u8; 24]);
        out.resize(data_offset as usize, 0xEE);
        for r in rows {
            out.extend_from_slice(r);
        }
        out
    }

    fn decode(data: &[u8]) -> Result<PixelGrid, BmpError> {
        decode_bmp(&mut SliceSource::new(data), None, &Unstoppable)
    }

    #[test]
    fn bottom_row_is_stored_first() {
        let data = file(
            1,
            2,
            54,
            &[&[1, 2, 3, 0], &[4, 5, 6, 0]], // bottom, then top
        );
        let grid = decode(&data).unwrap();
        assert_eq!(grid.get(0, 0), Some(Color::new(6, 5, 4)));
        assert_eq!(grid.get(0, 1), Some(Color::new(3, 2, 1)));
    }

    #[test]
    fn width_3_skips_3_padding_bytes() {
        let data = file(
            3,
            2,
            54,
            &[
                &[1, 1, 1, 2, 2, 2, 3, 3, 3, 0xFF, 0xFF, 0xFF],
                &[4, 4, 4, 5, 5, 5, 6, 6, 6, 0xFF, 0xFF, 0xFF],
            ],
        );
        let grid = decode(&data).unwrap();
        let top: Vec<u8> = grid.row(0).unwrap().iter().map(|c| c.red).collect();
        let bottom: Vec<u8> = grid.row(1).unwrap().iter().map(|c| c.red).collect();
        assert_eq!(top, [4, 5, 6]);
        assert_eq!(bottom, [1, 2, 3]);
    }

    #[test]
    fn width_4_has_no_padding() {
        let bottom: Vec<u8> = (0..12).collect();
        let top: Vec<u8> = (100..112).collect();
        let data = file(4, 2, 54, &[&bottom, &top]);
        assert_eq!(data.len(), 54 + 24);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.get(3, 0), Some(Color::from_bgr([109, 110, 111])));
        assert_eq!(grid.get(0, 1), Some(Color::from_bgr([0, 1, 2])));
    }

    #[test]
    fn honours_data_offset_gap() {
        let data = file(1, 1, 70, &[&[9, 8, 7, 0]]);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.pixels(), &[Color::new(7, 8, 9)]);
    }

    #[test]
    fn missing_final_padding_is_truncated() {
        let data = file(1, 1, 54, &[&[9, 8, 7]]);
        assert!(matches!(decode(&data), Err(BmpError::Truncated)));
    }

    #[test]
    fn huge_declared_size_fails_before_allocating() {
        let data = file(60_000, 60_000, 54, &[&[0; 16]]);
        assert!(matches!(decode(&data), Err(BmpError::Truncated)));
    }

    #[test]
    fn limits_checked_before_pixels() {
        let data = file(4, 4, 54, &[]);
        let limits = Limits {
            max_pixels: Some(15),
            ..Default::default()
        };
        let err = decode_bmp(&mut SliceSource::new(&data), Some(&limits), &Unstoppable);
        assert!(matches!(err, Err(BmpError::LimitExceeded(_))));
    }

    #[test]
    fn memory_limit_counts_grid_bytes() {
        let data = file(2, 2, 54, &[&[0; 8], &[0; 8]]);
        let tight = Limits {
            max_memory_bytes: Some(11),
            ..Default::default()
        };
        let exact = Limits {
            max_memory_bytes: Some(12),
            ..Default::default()
        };
        assert!(decode_bmp(&mut SliceSource::new(&data), Some(&tight), &Unstoppable).is_err());
        assert!(decode_bmp(&mut SliceSource::new(&data), Some(&exact), &Unstoppable).is_ok());
    }

    /// Passes `budget` checks, then cancels. Counts every check.
    struct TripAfter {
        budget: usize,
        calls: AtomicUsize,
    }

    impl TripAfter {
        fn new(budget: usize) -> Self {
            Self {
                budget,
                calls: AtomicUsize::new(0),
            }
        }
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

    fn tall_file() -> Vec<u8> {
        let rows: Vec<&[u8]> = (0..40).map(|_| &[1u8, 2, 3, 0][..]).collect();
        file(1, 40, 54, &rows)
    }

    #[test]
    fn stop_checked_before_pixels_then_every_16_rows() {
        let data = tall_file();
        let stop = TripAfter::new(usize::MAX);
        decode_bmp(&mut SliceSource::new(&data), None, &stop).unwrap();
        // Once up front, then rows 0, 16 and 32.
        assert_eq!(stop.calls.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn cancelled_before_any_row() {
        let data = tall_file();
        let mut src = SliceSource::new(&data);
        let err = decode_bmp(&mut src, None, &TripAfter::new(0));
        assert!(matches!(err, Err(BmpError::Cancelled(StopReason::Cancelled))));
        assert_eq!(src.position(), 54);
    }

    #[test]
    fn cancelled_at_row_16() {
        let data = tall_file();
        let mut src = SliceSource::new(&data);
        let err = decode_bmp(&mut src, None, &TripAfter::new(2));
        assert!(matches!(err, Err(BmpError::Cancelled(_))));
        // Rows 0..16 were read, row 16 was not.
        assert_eq!(src.position(), 54 + 16 * 4);
    }
}
