//! Compression level presets

use std::fmt;
use std::str::FromStr;

use crate::error::{ParzError, Result};

/// Compression effort, scaled to each codec's native range when a context
/// is created.
///
/// The symbolic presets let callers pick a point on the speed/ratio curve
/// without knowing a codec's numbering; `Explicit` is the escape hatch and
/// is clamped into the codec's native range. Once a codec value is built
/// with a level, every context it pools is created at that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Cheapest level the codec offers.
    Fastest,
    /// Low effort, still meaningfully better than `Fastest` on ratio.
    Fast,
    /// The codec's everyday default.
    Default,
    /// High effort short of the maximum.
    Good,
    /// The codec's maximum level.
    Best,
    /// A codec-native numeric level, clamped into the codec's range.
    Explicit(i32),
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Default
    }
}

impl CompressionLevel {
    /// Resolve this level against a codec's native scale.
    ///
    /// `presets` holds the native levels for `Fastest` through `Best` in
    /// order; explicit values are clamped to `min..=max`.
    pub fn to_native(self, presets: [i32; 5], min: i32, max: i32) -> i32 {
        match self {
            CompressionLevel::Fastest => presets[0],
            CompressionLevel::Fast => presets[1],
            CompressionLevel::Default => presets[2],
            CompressionLevel::Good => presets[3],
            CompressionLevel::Best => presets[4],
            CompressionLevel::Explicit(level) => level.clamp(min, max),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionLevel::Fastest => f.write_str("fastest"),
            CompressionLevel::Fast => f.write_str("fast"),
            CompressionLevel::Default => f.write_str("default"),
            CompressionLevel::Good => f.write_str("good"),
            CompressionLevel::Best => f.write_str("best"),
            CompressionLevel::Explicit(level) => write!(f, "{level}"),
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = ParzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fastest" => Ok(CompressionLevel::Fastest),
            "fast" => Ok(CompressionLevel::Fast),
            "default" => Ok(CompressionLevel::Default),
            "good" => Ok(CompressionLevel::Good),
            "best" => Ok(CompressionLevel::Best),
            other => other
                .parse::<i32>()
                .map(CompressionLevel::Explicit)
                .map_err(|_| ParzError::Internal(format!("unknown compression level '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZSTD_PRESETS: [i32; 5] = [1, 3, 9, 19, 22];

    #[test]
    fn presets_resolve_in_order() {
        assert_eq!(CompressionLevel::Fastest.to_native(ZSTD_PRESETS, 1, 22), 1);
        assert_eq!(CompressionLevel::Default.to_native(ZSTD_PRESETS, 1, 22), 9);
        assert_eq!(CompressionLevel::Best.to_native(ZSTD_PRESETS, 1, 22), 22);
    }

    #[test]
    fn explicit_levels_clamp_to_native_range() {
        assert_eq!(
            CompressionLevel::Explicit(40).to_native(ZSTD_PRESETS, 1, 22),
            22
        );
        assert_eq!(
            CompressionLevel::Explicit(-5).to_native(ZSTD_PRESETS, 1, 22),
            1
        );
        assert_eq!(
            CompressionLevel::Explicit(7).to_native(ZSTD_PRESETS, 1, 22),
            7
        );
    }

    #[test]
    fn levels_parse_from_names_and_numbers() {
        assert_eq!(
            "best".parse::<CompressionLevel>().unwrap(),
            CompressionLevel::Best
        );
        assert_eq!(
            "FAST".parse::<CompressionLevel>().unwrap(),
            CompressionLevel::Fast
        );
        assert_eq!(
            "12".parse::<CompressionLevel>().unwrap(),
            CompressionLevel::Explicit(12)
        );
        assert!("quick".parse::<CompressionLevel>().is_err());
    }
}
