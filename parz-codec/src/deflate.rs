//! Deflate-family codec over `flate2`
//!
//! One implementation covers raw deflate, zlib, and gzip: the framing is
//! picked when the codec value is built and baked into every context it
//! creates, alongside the compression level.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use parz_format::{CompressionLevel, ParzError, Result};

use crate::Codec;

/// Native levels for Fastest / Fast / Default / Good / Best.
const PRESETS: [i32; 5] = [1, 3, 6, 8, 9];
const MIN_LEVEL: i32 = 1;
const MAX_LEVEL: i32 = 9;

/// Largest window; gzip members written by other producers may need it.
const WINDOW_BITS: u8 = 15;

/// Stream framing applied to each frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeflateFraming {
    /// Bare deflate bit stream.
    Raw,
    /// Zlib wrapper (2-byte header, Adler-32 trailer).
    Zlib,
    /// Gzip wrapper (10-byte header, CRC-32 + length trailer).
    Gzip,
}

/// Deflate-family codec.
#[derive(Debug, Clone, Copy)]
pub struct DeflateCodec {
    framing: DeflateFraming,
    level: Compression,
}

impl DeflateCodec {
    /// Build a codec for the given framing and level.
    pub fn new(framing: DeflateFraming, level: CompressionLevel) -> Self {
        let native = level.to_native(PRESETS, MIN_LEVEL, MAX_LEVEL);
        Self {
            framing,
            level: Compression::new(native as u32),
        }
    }

    /// The framing baked into this codec's contexts.
    pub fn framing(&self) -> DeflateFraming {
        self.framing
    }

    /// The native flate2 level baked into this codec's contexts.
    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl Codec for DeflateCodec {
    type Compressor = Compress;
    type Decompressor = Decompress;

    fn create_compressor(&self) -> Result<Compress> {
        Ok(match self.framing {
            DeflateFraming::Raw => Compress::new(self.level, false),
            DeflateFraming::Zlib => Compress::new(self.level, true),
            DeflateFraming::Gzip => Compress::new_gzip(self.level, WINDOW_BITS),
        })
    }

    fn create_decompressor(&self) -> Result<Decompress> {
        Ok(match self.framing {
            DeflateFraming::Raw => Decompress::new(false),
            DeflateFraming::Zlib => Decompress::new(true),
            DeflateFraming::Gzip => Decompress::new_gzip(WINDOW_BITS),
        })
    }

    fn compress_bound(&self, len: usize) -> usize {
        // zlib's compressBound arithmetic, padded to also cover the larger
        // gzip wrapper.
        len + (len >> 12) + (len >> 14) + (len >> 25) + 32
    }

    fn compress(&self, ctx: &mut Compress, input: &[u8], output: &mut [u8]) -> Result<usize> {
        ctx.reset();
        match ctx.compress(input, output, FlushCompress::Finish) {
            Ok(Status::StreamEnd) => Ok(ctx.total_out() as usize),
            Ok(_) => Err(ParzError::CompressFailed(
                "output buffer filled before stream end".to_string(),
            )),
            Err(err) => Err(ParzError::CompressFailed(err.to_string())),
        }
    }

    fn decompress(&self, ctx: &mut Decompress, input: &[u8], output: &mut [u8]) -> Result<usize> {
        // inflateReset through flate2 cannot preserve the gzip wrapper
        // mode, so gzip contexts are rebuilt on entry instead.
        match self.framing {
            DeflateFraming::Raw => ctx.reset(false),
            DeflateFraming::Zlib => ctx.reset(true),
            DeflateFraming::Gzip => *ctx = Decompress::new_gzip(WINDOW_BITS),
        }
        match ctx.decompress(input, output, FlushDecompress::Finish) {
            Ok(Status::StreamEnd) => Ok(ctx.total_out() as usize),
            Ok(_) => Err(ParzError::BadData(
                "payload did not decode to a complete stream".to_string(),
            )),
            Err(err) => Err(ParzError::BadData(err.to_string())),
        }
    }
}
