use thiserror::Error;

use patchwork_serde::SerdeErr;

use crate::types::FieldId;

/// Errors that can occur while framing patch records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    /// Field ids travel as a single byte
    #[error("Field id {field_id} does not fit in a record header (max {max})")]
    FieldIdOutOfRange { field_id: FieldId, max: FieldId },

    /// Traversal path length travels as a single byte
    #[error("Traversal path of {len} entries is longer than the maximum of {max}")]
    PathTooLong { len: usize, max: usize },
}

/// Errors that can occur while reading patch records
///
/// SECURITY: packets come from the network, every malformed input maps to
/// one of these rather than a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    /// The packet header could not be read
    #[error("Failed to read packet header: {source}")]
    Header {
        #[source]
        source: SerdeErr,
    },

    /// A record could not be read
    #[error("Failed to read record {record_index}: {source}")]
    Record {
        record_index: u32,
        #[source]
        source: SerdeErr,
    },

    /// Bytes remain after the announced number of records
    #[error("{count} trailing bytes after the last record")]
    TrailingBytes { count: usize },
}
