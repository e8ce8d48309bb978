use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding and blending.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("not a BMP file: signature is not `BM`")]
    BadSignature,

    #[error("unsupported BMP info header size: {0}")]
    UnsupportedHeader(u32),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported bit depth {0} (only 24-bit BGR is supported)")]
    UnsupportedDepth(u16),

    #[error("unsupported row orientation: height {0} (only bottom-up, positive heights)")]
    UnsupportedOrientation(i32),

    #[error("unexpected end of input")]
    Truncated,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("invalid dimensions: {width}x{height} (both must be non-zero)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error(
        "dimension mismatch: background is {}x{}, foreground is {}x{}",
        .background.0, .background.1, .foreground.0, .foreground.1
    )]
    DimensionMismatch {
        background: (u32, u32),
        foreground: (u32, u32),
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("read failed: {0}")]
    Io(#[source] std::io::Error),

    #[cfg(feature = "std")]
    #[error("write failed: {0}")]
    WriteFailed(#[source] std::io::Error),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
