//! Context free-lists

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use parz_format::Result;

/// A mutex-guarded free list of codec contexts.
///
/// Contexts are created lazily on acquire and recycled on release; dropping
/// the pool drops every pooled context. The mutex is held only across a
/// list pop or push, never across context creation or a codec call.
pub struct ContextPool<T> {
    free: Mutex<Vec<T>>,
    created: AtomicUsize,
}

impl<T> ContextPool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            created: AtomicUsize::new(0),
        }
    }

    /// Pop a pooled context, or build a fresh one with `create`.
    pub fn acquire(&self, create: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(ctx) = self.free.lock().pop() {
            return Ok(ctx);
        }
        let ctx = create()?;
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(ctx)
    }

    /// Return a context to the free list.
    ///
    /// Callers that suspect the context's state (a failed codec call) drop
    /// it instead.
    pub fn release(&self, ctx: T) {
        self.free.lock().push(ctx);
    }

    /// Number of contexts this pool has ever created.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// Number of contexts currently sitting in the free list.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl<T> Default for ContextPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_reuses_released_contexts() {
        let pool: ContextPool<u32> = ContextPool::new();
        let first = pool.acquire(|| Ok(7)).expect("acquire");
        assert_eq!(pool.created(), 1);

        pool.release(first);
        assert_eq!(pool.idle(), 1);

        let again = pool.acquire(|| Ok(8)).expect("acquire");
        assert_eq!(again, 7, "free-list context preferred over creation");
        assert_eq!(pool.created(), 1);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn create_failure_propagates() {
        let pool: ContextPool<u32> = ContextPool::new();
        let result = pool.acquire(|| {
            Err(parz_format::ParzError::CodecInitFailed(
                "no memory".to_string(),
            ))
        });
        assert!(result.is_err());
        assert_eq!(pool.created(), 0);
    }
}
