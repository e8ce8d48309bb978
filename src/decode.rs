use enough::Stop;

use crate::bmp::{self, ByteSource, SliceSource};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Decode request for an in-memory BMP file.
///
/// ```no_run
/// use bmpblend::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let grid = DecodeRequest::new(data).with_limits(&limits).decode(Unstoppable)?;
/// # Ok::<(), bmpblend::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, BmpError> {
        decode_from(&mut SliceSource::new(self.data), self.limits, stop)
    }
}

/// Decode an in-memory BMP file.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<PixelGrid, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode from any [`ByteSource`] positioned at the `BM` signature.
pub fn decode_from<S: ByteSource + ?Sized>(
    src: &mut S,
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<PixelGrid, BmpError> {
    bmp::decode_bmp(src, limits, &stop)
}

/// Decode from a seekable reader positioned at the `BM` signature.
///
/// Offsets in the file are treated as absolute positions in the stream.
#[cfg(feature = "std")]
pub fn decode_reader<R: std::io::Read + std::io::Seek>(
    reader: R,
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<PixelGrid, BmpError> {
    decode_from(&mut bmp::IoSource::new(reader), limits, stop)
}
