//! Constants for the parz container and engine

/// Uncompressed bytes per chunk. Every frame payload decodes to at most
/// this many bytes.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Maximum number of in-flight jobs per stream operation. Caps both the
/// parallelism exposed to the worker pool and the chunk-buffer memory
/// ceiling.
pub const WINDOW_SIZE: usize = 16;

/// Size in bytes of the little-endian length prefix preceding each frame
/// payload.
pub const FRAME_LEN_SIZE: usize = 4;
