//! # bmpblend
//!
//! 24-bit BMP decoder/encoder and a min/max opacity blend for pairs of
//! equally-sized bitmaps.
//!
//! ## BMP support
//!
//! - Decode: uncompressed 24-bit BGR, bottom-up (positive height), with a
//!   BITMAPCOREHEADER or any BITMAPINFOHEADER-family info header (V2–V5
//!   included). Fields past the first 40 info-header bytes are ignored.
//! - Encode: 24-bit BGR, 40-byte BITMAPINFOHEADER, rows padded to 4 bytes.
//!
//! Decoded grids are top-down: row 0 is the visual top of the image.
//!
//! ## Blending
//!
//! [`combine`] interpolates each channel from the minimum of the two inputs
//! (alpha 0) to the maximum (alpha 255). It is symmetric in its two grids.
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, bitfields, embedded JPEG/PNG) BMPs
//! - Palette and 1/2/4/8/16/32-bit depths
//! - Top-down (negative height) BMPs
//! - Alpha channels and color management
//!
//! ## Usage
//!
//! ```no_run
//! use bmpblend::{Unstoppable, combine, decode, encode};
//!
//! let background: &[u8] = &[]; // your BMP bytes
//! let foreground: &[u8] = &[];
//!
//! let bg = decode(background, Unstoppable)?;
//! let fg = decode(foreground, Unstoppable)?;
//! let blended = combine(&bg, &fg, 128)?;
//! let bytes = encode(&blended, Unstoppable)?;
//! # Ok::<(), bmpblend::BmpError>(())
//! ```
//!
//! ## Features
//!
//! - `std`: [`std::io`] readers/writers ([`decode_reader`], [`encode_writer`])
//! - `rgb`, `imgref`: typed pixel conversions
//! - `cli`: the `bmpblend` command-line tool

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod blend;
mod error;
mod info;
mod limits;
mod pixel;

mod bmp;
mod decode;
mod encode;

// Re-exports
pub use blend::{alpha_from_opacity, blend_channel, blend_color, combine};
pub use bmp::{ByteSink, ByteSource, SliceSource};
#[cfg(feature = "std")]
pub use bmp::{IoSink, IoSource};
#[cfg(feature = "std")]
pub use decode::decode_reader;
pub use decode::{DecodeRequest, decode, decode_from};
#[cfg(feature = "std")]
pub use encode::encode_writer;
pub use encode::{encode, encode_to};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpError;
pub use info::{BmpInfo, InfoHeaderKind};
pub use limits::Limits;
pub use pixel::{Color, PixelGrid};
