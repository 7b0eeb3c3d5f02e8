use std::collections::BTreeMap;

use log::info;

use crate::types::{FieldId, TypeId};

use super::{
    data_type::DataType,
    error::{CollateError, PatchError, SchemaError},
    schema::{Field, Schema},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Primitive,
    Struct,
    Array,
    Map,
}

impl NodeKind {
    /// Arrays and maps consume one traversal path entry when descended into
    pub fn is_collection(self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Map)
    }
}

/// One addressable field of a collated schema.
///
/// `lo..=hi` covers this node's own id and the ids of all its descendants.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelNode {
    pub id: FieldId,
    pub key: String,
    pub lo: FieldId,
    pub hi: FieldId,
    pub kind: NodeKind,
    /// Set for primitive fields and for collections of primitives
    pub data_type: Option<DataType>,
    pub edges: Vec<ModelNode>,
}

impl ModelNode {
    fn new(id: FieldId, key: &str) -> Self {
        Self {
            id,
            key: key.to_string(),
            lo: id,
            hi: id,
            kind: NodeKind::Primitive,
            data_type: None,
            edges: Vec::new(),
        }
    }

    fn root() -> Self {
        Self {
            id: 0,
            key: String::new(),
            lo: 1,
            hi: 0,
            kind: NodeKind::Struct,
            data_type: None,
            edges: Vec::new(),
        }
    }

    pub fn contains(&self, field_id: FieldId) -> bool {
        self.lo <= field_id && field_id <= self.hi
    }

    /// All descendants in id order
    pub fn descendants(&self) -> Vec<&ModelNode> {
        let mut output = Vec::new();
        self.collect_descendants(&mut output);
        output
    }

    fn collect_descendants<'m>(&'m self, output: &mut Vec<&'m ModelNode>) {
        for edge in &self.edges {
            output.push(edge);
            edge.collect_descendants(output);
        }
    }
}

/// Assigns ids to every field of `schema`, appending the resulting nodes to
/// `target.edges`. Keys are visited in byte-wise order and numbered
/// pre-order starting after `ids`. Returns the last id assigned, which is
/// also written to `target.hi`.
pub fn collate_schema(
    schema: &Schema,
    target: &mut ModelNode,
    ids: FieldId,
) -> Result<FieldId, SchemaError> {
    let fields = schema.sorted_fields();

    if let Some(pair) = fields.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(SchemaError::DuplicateField {
            key: pair[0].0.to_string(),
        });
    }

    let mut ids = ids;

    for (key, field) in fields {
        ids += 1;
        let mut node = ModelNode::new(ids, key);

        match field {
            Field::Primitive(data_type) => {
                node.data_type = Some(data_type.clone());
            }
            Field::Array(element) | Field::Map(element) => {
                node.kind = match field {
                    Field::Array(_) => NodeKind::Array,
                    _ => NodeKind::Map,
                };
                match element.as_ref() {
                    Field::Primitive(data_type) => {
                        node.data_type = Some(data_type.clone());
                    }
                    Field::Struct(element_schema) => {
                        ids = collate_schema(element_schema, &mut node, ids)?;
                    }
                    nested => {
                        return Err(SchemaError::NestedCollection {
                            key: key.to_string(),
                            outer: field.kind_name(),
                            inner: nested.kind_name(),
                        });
                    }
                }
            }
            Field::Struct(inner) => {
                node.kind = NodeKind::Struct;
                ids = collate_schema(inner, &mut node, ids)?;
            }
        }

        target.edges.push(node);
    }

    target.hi = ids;

    Ok(ids)
}

/// Schemas keyed by the type id they are registered under
#[derive(Clone, Debug, Default)]
pub struct Model {
    schemas: BTreeMap<TypeId, Schema>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: TypeId, schema: Schema) -> Option<Schema> {
        self.schemas.insert(type_id, schema)
    }

    pub fn get(&self, type_id: TypeId) -> Option<&Schema> {
        self.schemas.get(&type_id)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.schemas.contains_key(&type_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Schema)> {
        self.schemas.iter().map(|(type_id, schema)| (*type_id, schema))
    }
}

/// Where a field sits within a collated type
#[derive(Clone, Copy, Debug)]
pub struct FieldLocation<'m> {
    pub node: &'m ModelNode,
    /// Number of arrays/maps crossed to reach the field, which is the
    /// traversal path length a patch of this field needs
    pub path_len: usize,
}

/// Read-only id graphs, one root per type id. Never mutated after collation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollatedModel {
    roots: BTreeMap<TypeId, ModelNode>,
}

impl CollatedModel {
    pub(crate) fn insert(&mut self, type_id: TypeId, root: ModelNode) {
        self.roots.insert(type_id, root);
    }

    pub fn root(&self, type_id: TypeId) -> Option<&ModelNode> {
        self.roots.get(&type_id)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.roots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Finds the node for `field_id` by range descent, without an instance
    pub fn locate(&self, type_id: TypeId, field_id: FieldId) -> Result<FieldLocation<'_>, PatchError> {
        let mut record = self
            .root(type_id)
            .ok_or(PatchError::TypeNotFound { type_id })?;
        let mut path_len = 0;
        let mut index = 0;

        while let Some(node) = record.edges.get(index) {
            if node.id == field_id {
                return Ok(FieldLocation { node, path_len });
            }
            if node.contains(field_id) {
                if node.kind.is_collection() {
                    path_len += 1;
                }
                record = node;
                index = 0;
            } else {
                index += 1;
            }
        }

        Err(PatchError::FieldNotFound { type_id, field_id })
    }
}

/// Collates every schema of `model` independently. Ids restart at 1 for each
/// type, so they are only unique within a type. Stops at the first schema
/// that fails.
pub fn collate(model: &Model) -> Result<CollatedModel, CollateError> {
    let mut collated = CollatedModel::default();

    for (type_id, schema) in model.iter() {
        let root = collate_root(schema).map_err(|source| CollateError { type_id, source })?;
        info!("Collated type {} into {} fields", type_id, root.hi);
        collated.insert(type_id, root);
    }

    Ok(collated)
}

/// Collates one schema under a fresh root, numbering from 1
pub fn collate_root(schema: &Schema) -> Result<ModelNode, SchemaError> {
    let mut root = ModelNode::root();
    collate_schema(schema, &mut root, 0)?;
    Ok(root)
}
