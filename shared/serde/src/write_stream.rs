use log::trace;

use crate::buffer_pool::{BufferPool, PooledBuffer};

/// A growable little-endian byte writer backed by a pooled buffer.
///
/// Every `write_*` returns the offset the value was written at, so length or
/// count fields can be written as placeholders and patched later with
/// [`WriteStream::write_u32_at`].
pub struct WriteStream {
    pool: BufferPool,
    buffer: PooledBuffer,
    offset: usize,
    initial_capacity: usize,
}

impl WriteStream {
    /// Creates a stream backed by a private pool
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_pool(BufferPool::default(), initial_capacity)
    }

    pub fn with_pool(pool: BufferPool, initial_capacity: usize) -> Self {
        let buffer = pool.alloc(initial_capacity);
        Self {
            pool,
            buffer,
            offset: 0,
            initial_capacity,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The written prefix of the backing buffer
    pub fn bytes(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes().to_vec()
    }

    /// Returns the current buffer to the pool and starts over at the
    /// configured initial capacity.
    pub fn reset(&mut self) {
        // the old buffer must be released before the new one is acquired so
        // it can be handed straight back
        self.buffer = self.pool.alloc(0);
        self.buffer = self.pool.alloc(self.initial_capacity);
        self.offset = 0;
    }

    /// Ensures `amount` more bytes fit after the current offset
    pub fn grow(&mut self, amount: usize) {
        let required = self.offset + amount;
        if self.buffer.capacity() >= required {
            return;
        }

        let mut next = self.pool.alloc(required);
        next[..self.offset].copy_from_slice(&self.buffer[..self.offset]);
        trace!(
            "WriteStream: grew from {} to {} bytes",
            self.buffer.capacity(),
            next.capacity()
        );
        // dropping the previous buffer returns it to the pool
        self.buffer = next;
    }

    fn write_array<const N: usize>(&mut self, bytes: [u8; N]) -> usize {
        self.grow(N);
        let offset = self.offset;
        self.buffer[offset..offset + N].copy_from_slice(&bytes);
        self.offset = offset + N;
        offset
    }

    pub fn write_u8(&mut self, value: u8) -> usize {
        self.write_array(value.to_le_bytes())
    }

    pub fn write_u16(&mut self, value: u16) -> usize {
        self.write_array(value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> usize {
        self.write_array(value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> usize {
        self.write_array(value.to_le_bytes())
    }

    pub fn write_f64(&mut self, value: f64) -> usize {
        self.write_array(value.to_le_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        self.grow(bytes.len());
        let offset = self.offset;
        self.buffer[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.offset = offset + bytes.len();
        offset
    }

    /// Overwrites four already-written bytes at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 4` lies beyond the written prefix.
    pub fn write_u32_at(&mut self, value: u32, offset: usize) {
        assert!(
            offset + 4 <= self.offset,
            "write_u32_at offset {} is outside the {} written bytes",
            offset,
            self.offset
        );
        self.buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}
