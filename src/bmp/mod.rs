//! 24-bit uncompressed BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode`], [`crate::encode`], etc.

mod decode;
mod encode;
mod header;
mod io;

pub(crate) use decode::decode_bmp;
pub(crate) use encode::{encode_bmp, encoded_len};
pub(crate) use header::read_headers;
#[cfg(feature = "std")]
pub use io::{IoSink, IoSource};
pub use io::{ByteSink, ByteSource, SliceSource};

/// Bytes per stored row: `width * 3` rounded up to a multiple of 4.
pub(crate) fn row_stride(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}
