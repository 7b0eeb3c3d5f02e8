use thiserror::Error;

use crate::types::{FieldId, TypeId};

/// Errors that can occur while collating a schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A collection directly wraps another collection, e.g. array_of(array_of(number()))
    #[error("Field '{key}' is a {outer} of {inner}; collections may only hold primitives or structs")]
    NestedCollection {
        key: String,
        outer: &'static str,
        inner: &'static str,
    },

    /// The same key was declared twice within one struct
    #[error("Field '{key}' is declared more than once")]
    DuplicateField { key: String },
}

/// A schema of a model failed to collate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Schema for type {type_id} is invalid: {source}")]
pub struct CollateError {
    pub type_id: TypeId,
    #[source]
    pub source: SchemaError,
}

/// Errors that can occur while applying a patch to an instance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// No collated model exists for the type id
    #[error("Type {type_id} has no collated model")]
    TypeNotFound { type_id: TypeId },

    /// The field id does not belong to the type's model, which means the
    /// sender and receiver disagree on the schema or the id was corrupted
    #[error("Failed to patch type {type_id}: field {field_id} not found")]
    FieldNotFound { type_id: TypeId, field_id: FieldId },

    /// The descent crossed more arrays/maps than the traversal path covers
    #[error("Traversal path exhausted at '{key}' after {consumed} entries")]
    TraversalPathExhausted { key: String, consumed: usize },

    /// The instance has no value where the model expects a container or element
    #[error("Instance has no value at '{key}'")]
    InstanceMismatch { key: String },
}
