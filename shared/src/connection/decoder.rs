use patchwork_serde::ReadStream;

use super::{error::DecoderError, patch_record::PatchRecord};

/// Iterates the records of one tick packet in the order they were written.
/// Stops after the first error.
pub struct PacketDecoder<'b> {
    reader: ReadStream<'b>,
    record_count: u32,
    record_index: u32,
    failed: bool,
}

impl<'b> PacketDecoder<'b> {
    pub fn new(bytes: &'b [u8]) -> Result<Self, DecoderError> {
        let mut reader = ReadStream::new(bytes);
        let record_count = reader
            .read_u32()
            .map_err(|source| DecoderError::Header { source })?;
        Ok(Self {
            reader,
            record_count,
            record_index: 0,
            failed: false,
        })
    }

    pub fn record_count(&self) -> u32 {
        self.record_count
    }
}

impl Iterator for PacketDecoder<'_> {
    type Item = Result<PatchRecord, DecoderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if self.record_index >= self.record_count {
            if self.reader.is_empty() {
                return None;
            }
            self.failed = true;
            return Some(Err(DecoderError::TrailingBytes {
                count: self.reader.remaining(),
            }));
        }

        let record_index = self.record_index;
        self.record_index += 1;

        let result = PatchRecord::read(&mut self.reader)
            .map_err(|source| DecoderError::Record {
                record_index,
                source,
            });
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
