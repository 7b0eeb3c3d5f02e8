use std::ops::{Deref, DerefMut};

use log::trace;

cfg_if! {
    if #[cfg(feature = "multithread")]
    {
        use std::sync::{Arc, Mutex};

        type PoolHandle = Arc<Mutex<PoolInner>>;

        fn new_handle(inner: PoolInner) -> PoolHandle {
            Arc::new(Mutex::new(inner))
        }

        fn with_inner<R>(handle: &PoolHandle, f: impl FnOnce(&mut PoolInner) -> R) -> R {
            // a poisoned pool still holds valid buffers
            let mut guard = handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut guard)
        }
    }
    else
    {
        use std::{cell::RefCell, rc::Rc};

        type PoolHandle = Rc<RefCell<PoolInner>>;

        fn new_handle(inner: PoolInner) -> PoolHandle {
            Rc::new(RefCell::new(inner))
        }

        fn with_inner<R>(handle: &PoolHandle, f: impl FnOnce(&mut PoolInner) -> R) -> R {
            f(&mut handle.borrow_mut())
        }
    }
}

/// Contains Config properties which will be used by a BufferPool
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Smallest bucket capacity in bytes. Requests below this are rounded up.
    pub min_capacity: usize,
    /// Number of free buffers retained per bucket. Extra buffers are dropped.
    pub max_free_per_bucket: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_capacity: 64,
            max_free_per_bucket: 32,
        }
    }
}

struct PoolInner {
    config: PoolConfig,
    // index `i` holds buffers of capacity `min_capacity << i`
    buckets: Vec<Vec<Vec<u8>>>,
}

impl PoolInner {
    fn bucket_index(&self, capacity: usize) -> (usize, usize) {
        let min = self.config.min_capacity.max(1).next_power_of_two();
        let size = capacity.max(min).next_power_of_two();
        let index = (size / min).trailing_zeros() as usize;
        (index, size)
    }
}

/// Free-list of byte buffers keyed by power-of-two capacity bucket.
///
/// Cloning a BufferPool yields another handle to the same free-list.
#[derive(Clone)]
pub struct BufferPool {
    inner: PoolHandle,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl BufferPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            inner: new_handle(PoolInner {
                config,
                buckets: Vec::new(),
            }),
        }
    }

    /// Acquires a buffer holding at least `capacity` bytes. The buffer goes
    /// back to this pool when the returned guard is dropped.
    pub fn alloc(&self, capacity: usize) -> PooledBuffer {
        if capacity == 0 {
            return PooledBuffer {
                bytes: Vec::new(),
                pool: None,
            };
        }

        let bytes = with_inner(&self.inner, |inner| {
            let (index, size) = inner.bucket_index(capacity);
            match inner.buckets.get_mut(index).and_then(|bucket| bucket.pop()) {
                Some(bytes) => bytes,
                None => {
                    trace!("BufferPool: allocating new buffer of {} bytes", size);
                    vec![0; size]
                }
            }
        });

        PooledBuffer {
            bytes,
            pool: Some(self.clone()),
        }
    }

    fn free(&self, bytes: Vec<u8>) {
        with_inner(&self.inner, |inner| {
            let (index, size) = inner.bucket_index(bytes.len());
            if size != bytes.len() {
                return;
            }
            if inner.buckets.len() <= index {
                inner.buckets.resize_with(index + 1, Vec::new);
            }
            let max_free = inner.config.max_free_per_bucket;
            let bucket = &mut inner.buckets[index];
            if bucket.len() < max_free {
                bucket.push(bytes);
            }
        });
    }

    /// Number of free buffers currently held across all buckets
    pub fn free_count(&self) -> usize {
        with_inner(&self.inner, |inner| inner.buckets.iter().map(Vec::len).sum())
    }
}

/// A buffer on loan from a BufferPool. Derefs to its full backing storage.
pub struct PooledBuffer {
    bytes: Vec<u8>,
    pool: Option<BufferPool>,
}

impl PooledBuffer {
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Deref for PooledBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.free(std::mem::take(&mut self.bytes));
        }
    }
}
