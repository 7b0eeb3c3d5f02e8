use thiserror::Error;

use patchwork_shared::{DecoderError, Entity, FieldId, PatchError, TypeId};

/// Errors that can occur while applying a received packet
///
/// Records before the failing one stay applied; `applied` counts them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The packet could not be decoded
    #[error("Malformed packet after {applied} applied records: {source}")]
    Decoder {
        applied: usize,
        #[source]
        source: DecoderError,
    },

    /// The record does not fit the local instance
    #[error("Failed to apply record {record_index} to {entity:?}: {source}")]
    Patch {
        record_index: usize,
        entity: Entity,
        #[source]
        source: PatchError,
    },

    /// No local instance exists and auto-instantiation is disabled
    #[error("Record {record_index} targets unknown instance {entity:?} of type {type_id}")]
    UnknownInstance {
        record_index: usize,
        entity: Entity,
        type_id: TypeId,
    },

    /// The value does not have the shape the field was declared with
    #[error("Record {record_index} carries a {actual} value for type {type_id} field {field_id}")]
    ValueRejected {
        record_index: usize,
        type_id: TypeId,
        field_id: FieldId,
        actual: &'static str,
    },
}
