//! Zstandard codec over `zstd`'s bulk API
//!
//! The bulk `Compressor`/`Decompressor` types are the one-shot variants of
//! the library: each call runs a whole frame through a context whose
//! session state is reset on entry, which is exactly the discipline the
//! pipeline needs for order-independent per-chunk output.

use zstd::bulk::{Compressor, Decompressor};

use parz_format::{CompressionLevel, ParzError, Result};

use crate::Codec;

/// Native levels for Fastest / Fast / Default / Good / Best.
const PRESETS: [i32; 5] = [1, 3, 9, 19, 22];
const MIN_LEVEL: i32 = 1;
const MAX_LEVEL: i32 = 22;

/// Zstandard codec.
#[derive(Debug, Clone, Copy)]
pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    /// Build a codec at the given level.
    pub fn new(level: CompressionLevel) -> Self {
        Self {
            level: level.to_native(PRESETS, MIN_LEVEL, MAX_LEVEL),
        }
    }

    /// The native zstd level baked into this codec's compressor contexts.
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Codec for ZstdCodec {
    type Compressor = Compressor<'static>;
    type Decompressor = Decompressor<'static>;

    fn create_compressor(&self) -> Result<Self::Compressor> {
        Compressor::new(self.level).map_err(|err| ParzError::CodecInitFailed(err.to_string()))
    }

    fn create_decompressor(&self) -> Result<Self::Decompressor> {
        Decompressor::new().map_err(|err| ParzError::CodecInitFailed(err.to_string()))
    }

    fn compress_bound(&self, len: usize) -> usize {
        zstd::zstd_safe::compress_bound(len)
    }

    fn compress(
        &self,
        ctx: &mut Self::Compressor,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize> {
        ctx.compress_to_buffer(input, output)
            .map_err(|err| ParzError::CompressFailed(err.to_string()))
    }

    fn decompress(
        &self,
        ctx: &mut Self::Decompressor,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize> {
        ctx.decompress_to_buffer(input, output)
            .map_err(|err| ParzError::BadData(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_at_every_preset() {
        let data = b"zstandard round trip input ".repeat(512);
        for level in [
            CompressionLevel::Fastest,
            CompressionLevel::Fast,
            CompressionLevel::Default,
            CompressionLevel::Good,
            CompressionLevel::Best,
        ] {
            let codec = ZstdCodec::new(level);
            let mut compressor = codec.create_compressor().expect("compressor");
            let mut compressed = vec![0u8; codec.compress_bound(data.len())];
            let written = codec
                .compress(&mut compressor, &data, &mut compressed)
                .expect("compress");

            let mut decompressor = codec.create_decompressor().expect("decompressor");
            let mut out = vec![0u8; data.len()];
            let restored = codec
                .decompress(&mut decompressor, &compressed[..written], &mut out)
                .expect("decompress");
            assert_eq!(&out[..restored], &data[..]);
        }
    }

    #[test]
    fn rejects_garbage_payloads() {
        let codec = ZstdCodec::new(CompressionLevel::Default);
        let mut decompressor = codec.create_decompressor().expect("decompressor");
        let garbage = [0xDEu8, 0xAD, 0xBE, 0xEF, 0x00, 0x11, 0x22, 0x33];
        let mut out = vec![0u8; 1024];
        match codec.decompress(&mut decompressor, &garbage, &mut out) {
            Err(ParzError::BadData(_)) => {}
            other => panic!("expected BadData, got {other:?}"),
        }
    }

    #[test]
    fn explicit_levels_clamp_to_zstd_range() {
        assert_eq!(ZstdCodec::new(CompressionLevel::Explicit(100)).level(), 22);
        assert_eq!(ZstdCodec::new(CompressionLevel::Explicit(-3)).level(), 1);
        assert_eq!(ZstdCodec::new(CompressionLevel::Explicit(11)).level(), 11);
    }
}
