use thiserror::Error;

use crate::{model::error::SchemaError, types::TypeId};

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// The collated model is only available once the protocol is locked
    #[error("Protocol is not locked yet. Call Protocol.lock() before reading the collated model")]
    NotLocked,

    /// A schema is already registered under this type id
    #[error("Type id {type_id} is already registered")]
    DuplicateTypeId { type_id: TypeId },

    /// Type ids at or above the first tag id would collide with relation tags
    #[error("Type id {type_id} is reserved: schema type ids must be below {first_tag_id}")]
    ReservedTypeId { type_id: TypeId, first_tag_id: u32 },

    /// Changing the relation config would drop relations created under the old one
    #[error("{count} relations were already created; configure relations before creating any")]
    RelationsAlreadyCreated { count: usize },

    /// A registered schema failed to collate
    #[error("Schema for type {type_id} is invalid: {source}")]
    InvalidSchema {
        type_id: TypeId,
        #[source]
        source: SchemaError,
    },
}
