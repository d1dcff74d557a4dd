//! Parz Codec - the boundary to the external compression libraries
//!
//! This crate wraps the two codec families behind one narrow capability:
//!
//! - `DeflateCodec`: raw deflate, zlib, and gzip framing over `flate2`
//! - `ZstdCodec`: Zstandard over `zstd`'s bulk one-shot API
//! - `ContextPool`: mutex-guarded free lists for codec contexts
//!
//! No streaming state crosses calls; every compress or decompress is a
//! one-shot operation over a freshly-reset context.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod deflate;
pub mod pool;
pub mod zstd;

// Re-export commonly used types
pub use parz_format::{CodecKind, CompressionLevel, ParzError, Result};

pub use self::deflate::{DeflateCodec, DeflateFraming};
pub use self::pool::ContextPool;
pub use self::zstd::ZstdCodec;

/// One-shot codec capability, implemented once per algorithm family.
///
/// A codec value is immutable configuration (framing, level); mutable
/// session state lives in the context types and is reset on entry to every
/// call. Compressing distinct chunks on different threads therefore yields
/// identical per-chunk output regardless of interleaving. Context
/// destruction is `Drop`.
pub trait Codec: Send + Sync + 'static {
    /// Compression context. Carries the level baked in at creation.
    type Compressor: Send + 'static;
    /// Decompression context.
    type Decompressor: Send + 'static;

    /// Allocate a compression context at the codec's configured level.
    fn create_compressor(&self) -> Result<Self::Compressor>;

    /// Allocate a decompression context.
    fn create_decompressor(&self) -> Result<Self::Decompressor>;

    /// Upper bound on the compressed size of `len` uncompressed bytes.
    fn compress_bound(&self, len: usize) -> usize;

    /// Compress `input` into `output`, returning the byte count written.
    ///
    /// `output` must hold at least `compress_bound(input.len())` bytes; a
    /// filled output buffer is reported as `CompressFailed`, never as a
    /// short write.
    fn compress(
        &self,
        ctx: &mut Self::Compressor,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize>;

    /// Decompress `input` into `output`, returning the byte count written.
    ///
    /// `output` must be large enough for the frame's decompressed size;
    /// rejected payloads surface as `BadData`.
    fn decompress(
        &self,
        ctx: &mut Self::Decompressor,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize>;
}
