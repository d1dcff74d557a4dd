//! The ordered, bounded-window pipeline driver
//!
//! One driver thread owns the source, the sink, and a FIFO of in-flight
//! jobs; pool workers own one job each. The queue is capped at the window
//! size and only its head is ever drained, so output lands in input order
//! while up to a window's worth of chunks compress concurrently. The same
//! cap is the engine's backpressure: reads stop whenever the window is
//! full.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver};
use tracing::debug;

use parz_codec::{Codec, ContextPool};
use parz_format::{
    decode_frame_len, encode_frame_len, ParzError, Result, CHUNK_SIZE, FRAME_LEN_SIZE, WINDOW_SIZE,
};

use crate::job::Job;

/// A codec instance bound to a worker pool.
///
/// Holds the codec configuration and both context free-lists; the pool is
/// supplied by the caller and may be shared between engines. Stream
/// operations borrow the engine immutably, so one engine can serve
/// sequential operations without re-creating contexts.
pub struct Engine<C: Codec> {
    shared: Arc<Shared<C>>,
    pool: Arc<rayon::ThreadPool>,
    window: usize,
}

/// State the workers need: the codec value and the context pools.
struct Shared<C: Codec> {
    codec: C,
    compressors: ContextPool<C::Compressor>,
    decompressors: ContextPool<C::Decompressor>,
}

impl<C: Codec> Engine<C> {
    /// Bind `codec` to `pool`. Allocates no codec contexts.
    pub fn new(codec: C, pool: Arc<rayon::ThreadPool>) -> Self {
        Self {
            shared: Arc::new(Shared {
                codec,
                compressors: ContextPool::new(),
                decompressors: ContextPool::new(),
            }),
            pool,
            window: WINDOW_SIZE,
        }
    }

    /// Cap the number of in-flight jobs per stream operation.
    ///
    /// Defaults to `WINDOW_SIZE`; values below 1 are raised to 1.
    pub fn window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Contexts created so far as `(compressors, decompressors)`.
    ///
    /// Bounded by the window for any sequence of stream operations on one
    /// engine; exposed for instrumentation.
    pub fn context_counts(&self) -> (usize, usize) {
        (
            self.shared.compressors.created(),
            self.shared.decompressors.created(),
        )
    }

    /// Idle pooled contexts as `(compressors, decompressors)`.
    pub fn idle_context_counts(&self) -> (usize, usize) {
        (
            self.shared.compressors.idle(),
            self.shared.decompressors.idle(),
        )
    }

    /// Compress `source` into a framed container on `sink`.
    ///
    /// On error the sink may hold a prefix of valid frames; the engine does
    /// not truncate or roll back. Every spawned job is awaited before the
    /// error returns.
    pub fn compress<R: Read, W: Write>(&self, source: &mut R, sink: &mut W) -> Result<()> {
        let mut queue = VecDeque::with_capacity(self.window);
        let result = self.drive_compress(source, sink, &mut queue);
        drain(&mut queue);
        result
    }

    /// Decompress a framed container from `source` into `sink`.
    ///
    /// The container format is private to this engine; feeding streams from
    /// unknown producers is rejected as corrupt rather than interpreted.
    pub fn decompress<R: Read, W: Write>(&self, source: &mut R, sink: &mut W) -> Result<()> {
        let mut queue = VecDeque::with_capacity(self.window);
        let result = self.drive_decompress(source, sink, &mut queue);
        drain(&mut queue);
        result
    }

    fn drive_compress<R: Read, W: Write>(
        &self,
        source: &mut R,
        sink: &mut W,
        queue: &mut VecDeque<Receiver<Job>>,
    ) -> Result<()> {
        // One bound serves every chunk; a short final chunk can only need
        // less.
        let output_bound = self.shared.codec.compress_bound(CHUNK_SIZE);
        let mut eof = false;
        let mut frames = 0u64;

        while !(eof && queue.is_empty()) {
            // Fill: read ahead until the window is full or the input ends.
            while queue.len() < self.window && !eof {
                let mut input = vec![0u8; CHUNK_SIZE];
                let len = read_full(source, &mut input)?;
                if len == 0 {
                    eof = true;
                    break;
                }
                let job = Job::new(input, len, output_bound);
                queue.push_back(self.spawn_compress(job));
            }

            // Drain: wait for the head job and emit its frame.
            if let Some(done) = queue.pop_front() {
                let job = recv_job(done)?;
                let written = job.result?;
                sink.write_all(&encode_frame_len(written as u32))
                    .map_err(ParzError::SinkIo)?;
                sink.write_all(&job.output[..written])
                    .map_err(ParzError::SinkIo)?;
                frames += 1;
            }
        }

        debug!(frames, "compression stream complete");
        Ok(())
    }

    fn drive_decompress<R: Read, W: Write>(
        &self,
        source: &mut R,
        sink: &mut W,
        queue: &mut VecDeque<Receiver<Job>>,
    ) -> Result<()> {
        // No conforming writer can produce a frame above the bound for one
        // chunk; larger prefixes are corruption, not work.
        let max_frame_len = self.shared.codec.compress_bound(CHUNK_SIZE);
        let mut eof = false;
        let mut frames = 0u64;

        while !(eof && queue.is_empty()) {
            while queue.len() < self.window && !eof {
                let len = match read_frame_len(source)? {
                    None => {
                        eof = true;
                        break;
                    }
                    Some(len) => len as usize,
                };
                if len == 0 {
                    return Err(ParzError::BadData("zero-length frame".to_string()));
                }
                if len > max_frame_len {
                    return Err(ParzError::BadData(format!(
                        "frame length {len} exceeds codec bound {max_frame_len}"
                    )));
                }
                let mut input = vec![0u8; len];
                read_payload(source, &mut input)?;
                let job = Job::new(input, len, CHUNK_SIZE);
                queue.push_back(self.spawn_decompress(job));
            }

            if let Some(done) = queue.pop_front() {
                let job = recv_job(done)?;
                let written = job.result?;
                sink.write_all(&job.output[..written])
                    .map_err(ParzError::SinkIo)?;
                frames += 1;
            }
        }

        debug!(frames, "decompression stream complete");
        Ok(())
    }

    fn spawn_compress(&self, mut job: Job) -> Receiver<Job> {
        let (done_tx, done_rx) = bounded(1);
        let shared = Arc::clone(&self.shared);
        self.pool.spawn(move || {
            run_compress_job(&shared, &mut job);
            // The driver drains every receiver before returning; a closed
            // channel means it is already unwinding, so the job is simply
            // dropped.
            let _ = done_tx.send(job);
        });
        done_rx
    }

    fn spawn_decompress(&self, mut job: Job) -> Receiver<Job> {
        let (done_tx, done_rx) = bounded(1);
        let shared = Arc::clone(&self.shared);
        self.pool.spawn(move || {
            run_decompress_job(&shared, &mut job);
            let _ = done_tx.send(job);
        });
        done_rx
    }
}

fn run_compress_job<C: Codec>(shared: &Shared<C>, job: &mut Job) {
    let mut ctx = match shared
        .compressors
        .acquire(|| shared.codec.create_compressor())
    {
        Ok(ctx) => ctx,
        Err(err) => {
            job.result = Err(err);
            return;
        }
    };
    match shared
        .codec
        .compress(&mut ctx, &job.input[..job.len], &mut job.output)
    {
        Ok(written) => {
            job.result = Ok(written);
            shared.compressors.release(ctx);
        }
        Err(err) => {
            // The context's session state is suspect after a failed call;
            // it is dropped rather than recycled.
            job.result = Err(err);
        }
    }
}

fn run_decompress_job<C: Codec>(shared: &Shared<C>, job: &mut Job) {
    let mut ctx = match shared
        .decompressors
        .acquire(|| shared.codec.create_decompressor())
    {
        Ok(ctx) => ctx,
        Err(err) => {
            job.result = Err(err);
            return;
        }
    };
    match shared
        .codec
        .decompress(&mut ctx, &job.input[..job.len], &mut job.output)
    {
        Ok(written) => {
            job.result = Ok(written);
            shared.decompressors.release(ctx);
        }
        Err(err) => {
            job.result = Err(err);
        }
    }
}

/// Read until `buf` is full or the source reports EOF; returns the bytes
/// read. `Interrupted` reads are retried.
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ParzError::SourceIo(err)),
        }
    }
    Ok(filled)
}

/// Read a frame length prefix. Clean EOF before the first byte yields
/// `None`; EOF inside the prefix is a truncated frame.
fn read_frame_len<R: Read>(source: &mut R) -> Result<Option<u32>> {
    let mut prefix = [0u8; FRAME_LEN_SIZE];
    match read_full(source, &mut prefix)? {
        0 => Ok(None),
        FRAME_LEN_SIZE => Ok(Some(decode_frame_len(prefix))),
        _ => Err(ParzError::TruncatedFrame),
    }
}

/// Read exactly a declared payload; EOF short of it is a truncated frame.
fn read_payload<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<()> {
    if read_full(source, buf)? < buf.len() {
        return Err(ParzError::TruncatedFrame);
    }
    Ok(())
}

fn recv_job(done: Receiver<Job>) -> Result<Job> {
    done.recv()
        .map_err(|_| ParzError::Internal("worker exited without completing its job".to_string()))
}

/// Wait out every in-flight worker so no job outlives the stream call.
fn drain(queue: &mut VecDeque<Receiver<Job>>) {
    for done in queue.drain(..) {
        let _ = done.recv();
    }
}
