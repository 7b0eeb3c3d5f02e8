use patchwork_shared::{Entity, FieldId, PathKey, TypeId};

/// A field of a local instance that was replaced by a received patch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchEvent {
    pub entity: Entity,
    pub type_id: TypeId,
    pub field_id: FieldId,
    /// Key of the replaced field within its parent
    pub key: String,
    pub path: Vec<PathKey>,
}
