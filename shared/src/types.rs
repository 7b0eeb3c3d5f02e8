/// Identifies one component schema. Assigned externally, one per schema.
pub type TypeId = u16;
/// Identifies one field within a collated schema. Unique per TypeId only.
pub type FieldId = u32;
