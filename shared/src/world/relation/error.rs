use thiserror::Error;

/// Errors that can occur while registering relations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// Every relation id that fits in the high bits of an id is taken
    #[error("Cannot register relation {relation_id}: relation ids are limited to {limit}")]
    CapacityExhausted { relation_id: u32, limit: u32 },

    /// Every tag component id above `first_tag_id` is taken
    #[error("Cannot allocate tag component id {tag_id}: tag ids are limited to {limit}")]
    TagIdsExhausted { tag_id: u32, limit: u32 },
}
