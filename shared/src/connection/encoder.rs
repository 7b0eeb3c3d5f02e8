use patchwork_serde::{BufferPool, WriteStream};

use super::{error::EncoderError, patch_record::PatchRecord};

/// Builds one tick packet: a record count followed by the records, in the
/// order they were written.
pub struct PacketEncoder {
    stream: WriteStream,
    count_offset: usize,
    record_count: u32,
}

impl PacketEncoder {
    pub fn new(pool: BufferPool, initial_capacity: usize) -> Self {
        let mut stream = WriteStream::with_pool(pool, initial_capacity);
        let count_offset = stream.write_u32(0);
        Self {
            stream,
            count_offset,
            record_count: 0,
        }
    }

    pub fn write_record(&mut self, record: &PatchRecord) -> Result<(), EncoderError> {
        record.write(&mut self.stream)?;
        self.record_count += 1;
        Ok(())
    }

    pub fn record_count(&self) -> u32 {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Patches the record count into the header and returns the packet
    pub fn finish(&mut self) -> &[u8] {
        self.stream.write_u32_at(self.record_count, self.count_offset);
        self.stream.bytes()
    }

    /// Releases the packet buffer and starts a new, empty packet
    pub fn reset(&mut self) {
        self.stream.reset();
        self.count_offset = self.stream.write_u32(0);
        self.record_count = 0;
    }
}
