use patchwork_serde::{ReadStream, Serde, SerdeErr, WriteStream};

use crate::types::{FieldId, TypeId};

use super::{collate::CollatedModel, error::PatchError};

/// One traversal path entry: an array index or a map key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathKey {
    Index(u32),
    Key(String),
}

impl From<u32> for PathKey {
    fn from(index: u32) -> Self {
        PathKey::Index(index)
    }
}

impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        PathKey::Key(key.to_string())
    }
}

impl From<String> for PathKey {
    fn from(key: String) -> Self {
        PathKey::Key(key)
    }
}

impl Serde for PathKey {
    fn ser(&self, writer: &mut WriteStream) {
        match self {
            PathKey::Index(index) => {
                writer.write_u8(0);
                writer.write_u32(*index);
            }
            PathKey::Key(key) => {
                writer.write_u8(1);
                key.ser(writer);
            }
        }
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        match reader.read_u8()? {
            0 => Ok(PathKey::Index(reader.read_u32()?)),
            1 => Ok(PathKey::Key(String::de(reader)?)),
            tag => Err(SerdeErr::InvalidTag {
                kind: "path key",
                tag,
            }),
        }
    }
}

/// A live value the patch applier can walk into
pub trait Instance {
    /// The value stored under a struct field
    fn field_mut(&mut self, key: &str) -> Option<&mut Self>;

    /// The element of an array or map addressed by a traversal path entry
    fn element_mut(&mut self, key: &PathKey) -> Option<&mut Self>;
}

/// Locates field `field_id` of `instance` and hands its parent container and
/// key to `callback`.
///
/// The descent follows `lo..=hi` ranges through the collated model, so each
/// level only scans the children of one node. Every array or map crossed on
/// the way consumes the next entry of `path`.
pub fn patch<I, R, F>(
    model: &CollatedModel,
    type_id: TypeId,
    field_id: FieldId,
    instance: &mut I,
    path: &[PathKey],
    callback: F,
) -> Result<R, PatchError>
where
    I: Instance,
    F: FnOnce(&mut I, &str) -> R,
{
    let mut record = model
        .root(type_id)
        .ok_or(PatchError::TypeNotFound { type_id })?;
    let mut current = instance;
    let mut consumed = 0;
    let mut index = 0;

    while let Some(node) = record.edges.get(index) {
        if node.id == field_id {
            return Ok(callback(current, &node.key));
        }

        if node.contains(field_id) {
            let container = current
                .field_mut(&node.key)
                .ok_or_else(|| PatchError::InstanceMismatch {
                    key: node.key.clone(),
                })?;

            current = if node.kind.is_collection() {
                let step = path
                    .get(consumed)
                    .ok_or_else(|| PatchError::TraversalPathExhausted {
                        key: node.key.clone(),
                        consumed,
                    })?;
                consumed += 1;
                container
                    .element_mut(step)
                    .ok_or_else(|| PatchError::InstanceMismatch {
                        key: node.key.clone(),
                    })?
            } else {
                container
            };

            record = node;
            index = 0;
        } else {
            index += 1;
        }
    }

    Err(PatchError::FieldNotFound { type_id, field_id })
}
