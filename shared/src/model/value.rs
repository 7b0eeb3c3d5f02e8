use std::collections::BTreeMap;

use patchwork_serde::{ReadStream, Serde, SerdeErr, WriteStream};

use super::{
    collate::{ModelNode, NodeKind},
    data_type::DataType,
    patch::{Instance, PathKey},
    schema::{Field, Schema},
};

/// Deepest nesting accepted when decoding a Value
pub const MAX_VALUE_DEPTH: usize = 32;

/// A dynamically-shaped schema instance
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Struct(BTreeMap<String, Value>),
}

impl Value {
    /// A struct holding every field's default
    pub fn from_schema(schema: &Schema) -> Self {
        Value::Struct(
            schema
                .fields()
                .map(|(key, field)| (key.to_string(), Value::from_field(field)))
                .collect(),
        )
    }

    pub fn from_field(field: &Field) -> Self {
        match field {
            Field::Primitive(data_type) => Value::from(data_type),
            Field::Array(_) => Value::Array(Vec::new()),
            Field::Map(_) => Value::Map(BTreeMap::new()),
            Field::Struct(schema) => Value::from_schema(schema),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) | Value::Map(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Replaces a struct field. Returns false if this is not a struct.
    pub fn set_field(&mut self, key: &str, value: Value) -> bool {
        match self {
            Value::Struct(fields) => {
                fields.insert(key.to_string(), value);
                true
            }
            _ => false,
        }
    }

    /// True if this value can be stored at `node`, down to every element
    /// and nested field
    pub fn conforms_to(&self, node: &ModelNode) -> bool {
        match (node.kind, self) {
            (NodeKind::Primitive, value) => node
                .data_type
                .as_ref()
                .is_some_and(|data_type| value.is_data_type(data_type)),
            (NodeKind::Struct, Value::Struct(fields)) => Value::fields_conform(fields, &node.edges),
            (NodeKind::Array, Value::Array(items)) => {
                items.iter().all(|item| item.conforms_to_element(node))
            }
            (NodeKind::Map, Value::Map(entries)) => {
                entries.values().all(|item| item.conforms_to_element(node))
            }
            _ => false,
        }
    }

    fn is_data_type(&self, data_type: &DataType) -> bool {
        matches!(
            (data_type, self),
            (DataType::Number(_), Value::Number(_))
                | (DataType::String(_), Value::String(_))
                | (DataType::Boolean(_), Value::Boolean(_))
        )
    }

    // collections of primitives carry a data type, collections of structs
    // carry the element's fields as edges
    fn conforms_to_element(&self, collection: &ModelNode) -> bool {
        match (&collection.data_type, self) {
            (Some(data_type), value) => value.is_data_type(data_type),
            (None, Value::Struct(fields)) => Value::fields_conform(fields, &collection.edges),
            _ => false,
        }
    }

    fn fields_conform(fields: &BTreeMap<String, Value>, edges: &[ModelNode]) -> bool {
        // edge keys are unique, so equal counts plus every edge present means
        // the key sets match exactly
        fields.len() == edges.len()
            && edges.iter().all(|edge| {
                fields
                    .get(&edge.key)
                    .is_some_and(|value| value.conforms_to(edge))
            })
    }

    fn ser_entries(entries: &BTreeMap<String, Value>, writer: &mut WriteStream) {
        writer.write_u32(entries.len() as u32);
        for (key, value) in entries {
            key.ser(writer);
            value.ser(writer);
        }
    }

    fn de_entries(
        reader: &mut ReadStream,
        depth: usize,
    ) -> Result<BTreeMap<String, Value>, SerdeErr> {
        let count = reader.read_u32()?;
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let key = String::de(reader)?;
            let value = Value::de_depth(reader, depth + 1)?;
            entries.insert(key, value);
        }
        Ok(entries)
    }

    fn de_depth(reader: &mut ReadStream, depth: usize) -> Result<Self, SerdeErr> {
        if depth > MAX_VALUE_DEPTH {
            return Err(SerdeErr::DepthExceeded {
                limit: MAX_VALUE_DEPTH,
            });
        }

        match reader.read_u8()? {
            0 => Ok(Value::Number(reader.read_f64()?)),
            1 => Ok(Value::Boolean(bool::de(reader)?)),
            2 => Ok(Value::String(String::de(reader)?)),
            3 => {
                let count = reader.read_u32()?;
                // each element takes at least one byte
                let mut items = Vec::with_capacity((count as usize).min(reader.remaining()));
                for _ in 0..count {
                    items.push(Value::de_depth(reader, depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            4 => Ok(Value::Map(Value::de_entries(reader, depth)?)),
            5 => Ok(Value::Struct(Value::de_entries(reader, depth)?)),
            tag => Err(SerdeErr::InvalidTag { kind: "value", tag }),
        }
    }
}

impl From<&DataType> for Value {
    fn from(data_type: &DataType) -> Self {
        match data_type {
            DataType::Number(default) => Value::Number(*default),
            DataType::String(default) => Value::String(default.clone()),
            DataType::Boolean(default) => Value::Boolean(*default),
        }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Value::Boolean(boolean)
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::String(string.to_string())
    }
}

impl Instance for Value {
    fn field_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self {
            Value::Struct(fields) => fields.get_mut(key),
            _ => None,
        }
    }

    fn element_mut(&mut self, key: &PathKey) -> Option<&mut Self> {
        match (self, key) {
            (Value::Array(items), PathKey::Index(index)) => items.get_mut(*index as usize),
            (Value::Map(entries), PathKey::Key(key)) => entries.get_mut(key),
            _ => None,
        }
    }
}

impl Serde for Value {
    fn ser(&self, writer: &mut WriteStream) {
        match self {
            Value::Number(number) => {
                writer.write_u8(0);
                writer.write_f64(*number);
            }
            Value::Boolean(boolean) => {
                writer.write_u8(1);
                boolean.ser(writer);
            }
            Value::String(string) => {
                writer.write_u8(2);
                string.ser(writer);
            }
            Value::Array(items) => {
                writer.write_u8(3);
                writer.write_u32(items.len() as u32);
                for item in items {
                    item.ser(writer);
                }
            }
            Value::Map(entries) => {
                writer.write_u8(4);
                Value::ser_entries(entries, writer);
            }
            Value::Struct(fields) => {
                writer.write_u8(5);
                Value::ser_entries(fields, writer);
            }
        }
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        Value::de_depth(reader, 0)
    }
}
