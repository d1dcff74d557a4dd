//! Per-chunk work records

use parz_format::Result;

/// One chunk's worth of work.
///
/// A job owns its buffers for its whole lifetime: the driver builds it,
/// moves it into exactly one worker at spawn, and receives it back over the
/// job's completion channel once the worker is done. Nothing is shared, so
/// no locking guards the buffers.
pub(crate) struct Job {
    /// Owned input buffer. For compression this is a full chunk-sized
    /// allocation even when the final read came up short.
    pub(crate) input: Vec<u8>,
    /// Length of the populated prefix of `input`.
    pub(crate) len: usize,
    /// Owned output buffer, sized to the worst case for the direction.
    pub(crate) output: Vec<u8>,
    /// Bytes written into `output`, or the codec failure.
    pub(crate) result: Result<usize>,
}

impl Job {
    pub(crate) fn new(input: Vec<u8>, len: usize, output_capacity: usize) -> Self {
        Self {
            input,
            len,
            output: vec![0u8; output_capacity],
            result: Ok(0),
        }
    }
}
