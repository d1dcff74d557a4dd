//! Parz Format - Core primitives for the parz container
//!
//! This crate provides the no-I/O building blocks shared by the codec and
//! streaming layers:
//!
//! - Chunk and window constants
//! - Frame-length prefix encoding
//! - Codec family tags
//! - Compression level presets
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod frame;
pub mod level;

// Re-export commonly used types
pub use constants::{CHUNK_SIZE, FRAME_LEN_SIZE, WINDOW_SIZE};
pub use error::{ParzError, Result};
pub use frame::{decode_frame_len, encode_frame_len};
pub use level::CompressionLevel;

use std::fmt;
use std::str::FromStr;

/// Codec family selector.
///
/// `Deflate`, `Gzip`, and `Zlib` share one implementation that picks the
/// stream framing of each payload at construction time; `Zstd` is distinct.
/// A reader must be configured with the same kind as the writer; the
/// container itself carries no codec tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Raw deflate payloads, no wrapper.
    Deflate,
    /// Gzip-wrapped deflate payloads.
    Gzip,
    /// Zlib-wrapped deflate payloads.
    Zlib,
    /// Zstandard payloads.
    Zstd,
}

impl CodecKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [CodecKind; 4] = [
        CodecKind::Deflate,
        CodecKind::Gzip,
        CodecKind::Zlib,
        CodecKind::Zstd,
    ];
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecKind::Deflate => "deflate",
            CodecKind::Gzip => "gzip",
            CodecKind::Zlib => "zlib",
            CodecKind::Zstd => "zstd",
        };
        f.write_str(name)
    }
}

impl FromStr for CodecKind {
    type Err = ParzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "deflate" => Ok(CodecKind::Deflate),
            "gzip" => Ok(CodecKind::Gzip),
            "zlib" => Ok(CodecKind::Zlib),
            "zstd" => Ok(CodecKind::Zstd),
            other => Err(ParzError::Internal(format!("unknown codec '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_kind_parses_case_insensitively() {
        assert_eq!("Zstd".parse::<CodecKind>().unwrap(), CodecKind::Zstd);
        assert_eq!("GZIP".parse::<CodecKind>().unwrap(), CodecKind::Gzip);
        assert_eq!("deflate".parse::<CodecKind>().unwrap(), CodecKind::Deflate);
        assert_eq!("zlib".parse::<CodecKind>().unwrap(), CodecKind::Zlib);
    }

    #[test]
    fn codec_kind_rejects_unknown_names() {
        assert!("brotli".parse::<CodecKind>().is_err());
    }

    #[test]
    fn codec_kind_display_round_trips() {
        for kind in CodecKind::ALL {
            assert_eq!(kind.to_string().parse::<CodecKind>().unwrap(), kind);
        }
    }
}
