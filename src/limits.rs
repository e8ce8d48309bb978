use crate::error::BmpError;
use crate::info::BmpInfo;
use crate::pixel::Color;

/// Caps applied to a BMP's headers before any pixel memory is allocated.
///
/// `None` means unlimited; `Limits::default()` limits nothing.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded grid, `width * height * size_of::<Color>()`.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Validate parsed header dimensions against every configured cap.
    pub(crate) fn check_info(&self, info: &BmpInfo) -> Result<(), BmpError> {
        let width = u64::from(info.width);
        let height = u64::from(info.height);
        within("width", width, self.max_width)?;
        within("height", height, self.max_height)?;

        // u32 * u32 always fits in u64.
        let pixels = width * height;
        within("pixel count", pixels, self.max_pixels)?;

        let grid_bytes = pixels
            .checked_mul(core::mem::size_of::<Color>() as u64)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        within("decoded grid bytes", grid_bytes, self.max_memory_bytes)
    }
}

fn within(what: &str, value: u64, max: Option<u64>) -> Result<(), BmpError> {
    match max {
        Some(max) if value > max => Err(BmpError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::InfoHeaderKind;

    fn info(width: u32, height: u32) -> BmpInfo {
        BmpInfo {
            width,
            height,
            bits_per_pixel: 24,
            header: InfoHeaderKind::Info,
            data_offset: 54,
            file_size: 0,
        }
    }

    #[test]
    fn default_has_no_limits() {
        assert!(Limits::default().check_info(&info(1, 1)).is_ok());
        assert!(Limits::default().check_info(&info(1 << 20, 1 << 20)).is_ok());
    }

    #[test]
    fn each_dimension_limit_is_enforced() {
        let limits = Limits {
            max_width: Some(10),
            max_height: Some(20),
            max_pixels: Some(150),
            ..Default::default()
        };
        assert!(limits.check_info(&info(10, 15)).is_ok());
        assert!(matches!(
            limits.check_info(&info(11, 1)),
            Err(BmpError::LimitExceeded(_))
        ));
        assert!(matches!(
            limits.check_info(&info(1, 21)),
            Err(BmpError::LimitExceeded(_))
        ));
        assert!(matches!(
            limits.check_info(&info(10, 16)),
            Err(BmpError::LimitExceeded(_))
        ));
    }

    #[test]
    fn memory_limit_counts_three_bytes_per_pixel() {
        let limits = Limits {
            max_memory_bytes: Some(300),
            ..Default::default()
        };
        assert!(limits.check_info(&info(10, 10)).is_ok());
        assert!(matches!(
            limits.check_info(&info(101, 1)),
            Err(BmpError::LimitExceeded(msg)) if msg.contains("303")
        ));
    }

    #[test]
    fn grid_byte_overflow_is_too_large() {
        let limits = Limits {
            max_memory_bytes: Some(u64::MAX),
            ..Default::default()
        };
        assert!(matches!(
            limits.check_info(&info(u32::MAX, u32::MAX)),
            Err(BmpError::DimensionsTooLarge { .. })
        ));
    }
}
