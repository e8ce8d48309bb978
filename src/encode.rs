use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::{self, ByteSink};
use crate::error::BmpError;
use crate::pixel::PixelGrid;

/// Encode `grid` as a 24-bit BMP file in memory.
pub fn encode(grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    let mut out = Vec::with_capacity(bmp::encoded_len(grid)?);
    bmp::encode_bmp(grid, &mut out, &stop)?;
    Ok(out)
}

/// Encode `grid` into any [`ByteSink`].
///
/// On error the sink holds a partial file and should be discarded.
pub fn encode_to<K: ByteSink + ?Sized>(
    grid: &PixelGrid,
    sink: &mut K,
    stop: impl Stop,
) -> Result<(), BmpError> {
    bmp::encode_bmp(grid, sink, &stop)
}

/// Encode `grid` into a writer, flushing it at the end.
///
/// Write failures surface as [`BmpError::WriteFailed`]; the writer is left
/// holding whatever was written so far.
#[cfg(feature = "std")]
pub fn encode_writer<W: std::io::Write>(
    grid: &PixelGrid,
    writer: W,
    stop: impl Stop,
) -> Result<(), BmpError> {
    encode_to(grid, &mut bmp::IoSink::new(writer), stop)
}
