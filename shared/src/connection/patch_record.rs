use patchwork_serde::{ReadStream, Serde, SerdeErr, WriteStream};

use crate::{
    model::{patch::PathKey, value::Value},
    types::{FieldId, TypeId},
    world::entity::entity::Entity,
};

use super::error::EncoderError;

pub const MAX_RECORD_FIELD_ID: FieldId = u8::MAX as FieldId;
pub const MAX_RECORD_PATH_LEN: usize = u8::MAX as usize;

/// One field mutation of one entity, together with the new value
#[derive(Clone, Debug, PartialEq)]
pub struct PatchRecord {
    pub entity: Entity,
    pub type_id: TypeId,
    pub field_id: FieldId,
    pub path: Vec<PathKey>,
    pub value: Value,
}

impl PatchRecord {
    pub fn new(entity: Entity, type_id: TypeId, field_id: FieldId, value: impl Into<Value>) -> Self {
        Self {
            entity,
            type_id,
            field_id,
            path: Vec::new(),
            value: value.into(),
        }
    }

    pub fn with_path(mut self, path: Vec<PathKey>) -> Self {
        self.path = path;
        self
    }

    /// Checks the record fits the header before anything is written, so a
    /// rejected record never leaves partial bytes in the stream
    pub fn check(&self) -> Result<(), EncoderError> {
        if self.field_id > MAX_RECORD_FIELD_ID {
            return Err(EncoderError::FieldIdOutOfRange {
                field_id: self.field_id,
                max: MAX_RECORD_FIELD_ID,
            });
        }
        if self.path.len() > MAX_RECORD_PATH_LEN {
            return Err(EncoderError::PathTooLong {
                len: self.path.len(),
                max: MAX_RECORD_PATH_LEN,
            });
        }
        Ok(())
    }

    /// `[u32 entity][u8 field_id][u16 type_id][u8 path_len][path..][value]`
    pub fn write(&self, writer: &mut WriteStream) -> Result<usize, EncoderError> {
        self.check()?;

        let offset = writer.write_u32(self.entity.to_u32());
        writer.write_u8(self.field_id as u8);
        writer.write_u16(self.type_id);
        writer.write_u8(self.path.len() as u8);
        for key in &self.path {
            key.ser(writer);
        }
        self.value.ser(writer);

        Ok(offset)
    }

    pub fn read(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        let entity = Entity::from_u32(reader.read_u32()?);
        let field_id = FieldId::from(reader.read_u8()?);
        let type_id = reader.read_u16()?;
        let path_len = reader.read_u8()?;
        let mut path = Vec::with_capacity(usize::from(path_len));
        for _ in 0..path_len {
            path.push(PathKey::de(reader)?);
        }
        let value = Value::de(reader)?;

        Ok(Self {
            entity,
            type_id,
            field_id,
            path,
            value,
        })
    }
}
