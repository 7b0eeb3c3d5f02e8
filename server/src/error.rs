use thiserror::Error;

use patchwork_shared::{EncoderError, Entity, FieldId, PatchError, TypeId};

use crate::UserKey;

/// Errors that can occur while queueing patches on the Server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// No User exists for the given key
    #[error("No User exists for key {user_key:?}")]
    UserNotFound { user_key: UserKey },

    /// The record does not address a field of the collated model
    #[error("Mutation {index} of {entity:?} is invalid: {source}")]
    InvalidField {
        index: usize,
        entity: Entity,
        #[source]
        source: PatchError,
    },

    /// The traversal path does not match the arrays/maps crossed by the field
    #[error("Mutation {index} of type {type_id} field {field_id} needs a traversal path of {expected} entries, got {actual}")]
    PathLengthMismatch {
        index: usize,
        type_id: TypeId,
        field_id: FieldId,
        expected: usize,
        actual: usize,
    },

    /// The value does not have the shape the field was declared with
    #[error("Mutation {index} of type {type_id} field {field_id} carries a {actual} value where the schema declares '{key}'")]
    ValueMismatch {
        index: usize,
        type_id: TypeId,
        field_id: FieldId,
        key: String,
        actual: &'static str,
    },

    /// The record cannot be framed
    #[error("Mutation {index} cannot be encoded: {source}")]
    Encoder {
        index: usize,
        #[source]
        source: EncoderError,
    },
}
