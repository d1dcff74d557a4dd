//! Parz I/O - the streaming pipeline layer
//!
//! This crate drives chunked compression and decompression over plain
//! `Read`/`Write` streams:
//!
//! - `Engine`: a codec instance bound to a worker pool, with ordered,
//!   bounded-window `compress` and `decompress` stream operations
//! - Top-level `compress`/`decompress` functions dispatching on `CodecKind`
//! - `build_pool`: a small helper around `rayon::ThreadPoolBuilder`

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod job;
pub mod pipeline;

// Re-export commonly used types
pub use parz_codec::{Codec, ContextPool, DeflateCodec, DeflateFraming, ZstdCodec};
pub use parz_format::{
    CodecKind, CompressionLevel, ParzError, Result, CHUNK_SIZE, WINDOW_SIZE,
};

pub use pipeline::Engine;

use std::io::{Read, Write};
use std::sync::Arc;

/// Build a rayon worker pool with `threads` workers (0 = rayon's default).
///
/// The pool outlives every engine constructed over it; sharing one pool
/// between engines is the expected arrangement.
pub fn build_pool(threads: usize) -> Result<Arc<rayon::ThreadPool>> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map(Arc::new)
        .map_err(|err| ParzError::Internal(format!("worker pool construction failed: {err}")))
}

/// Compress `source` into `sink` with a one-off engine of the given kind.
pub fn compress<R: Read, W: Write>(
    kind: CodecKind,
    level: CompressionLevel,
    pool: Arc<rayon::ThreadPool>,
    source: &mut R,
    sink: &mut W,
) -> Result<()> {
    match kind {
        CodecKind::Deflate => {
            Engine::new(DeflateCodec::new(DeflateFraming::Raw, level), pool).compress(source, sink)
        }
        CodecKind::Gzip => {
            Engine::new(DeflateCodec::new(DeflateFraming::Gzip, level), pool).compress(source, sink)
        }
        CodecKind::Zlib => {
            Engine::new(DeflateCodec::new(DeflateFraming::Zlib, level), pool).compress(source, sink)
        }
        CodecKind::Zstd => Engine::new(ZstdCodec::new(level), pool).compress(source, sink),
    }
}

/// Decompress `source` into `sink` with a one-off engine of the given kind.
///
/// The reader must be configured with the writer's codec kind; the
/// container carries no tag of its own.
pub fn decompress<R: Read, W: Write>(
    kind: CodecKind,
    level: CompressionLevel,
    pool: Arc<rayon::ThreadPool>,
    source: &mut R,
    sink: &mut W,
) -> Result<()> {
    match kind {
        CodecKind::Deflate => Engine::new(DeflateCodec::new(DeflateFraming::Raw, level), pool)
            .decompress(source, sink),
        CodecKind::Gzip => Engine::new(DeflateCodec::new(DeflateFraming::Gzip, level), pool)
            .decompress(source, sink),
        CodecKind::Zlib => Engine::new(DeflateCodec::new(DeflateFraming::Zlib, level), pool)
            .decompress(source, sink),
        CodecKind::Zstd => Engine::new(ZstdCodec::new(level), pool).decompress(source, sink),
    }
}
