use log::info;

use crate::{
    model::{
        collate::{collate, CollatedModel, Model},
        error::CollateError,
        schema::Schema,
    },
    types::TypeId,
    world::relation::relation::{Relation, RelationConfig, RelationRegistry},
};

pub mod error;
pub use error::ProtocolError;

// Protocol Plugin
pub trait ProtocolPlugin {
    fn build(&self, protocol: &mut Protocol);
}

// Protocol
pub struct Protocol {
    /// Schemas keyed by type id
    pub model: Model,
    /// Relations known to both peers
    pub relations: RelationRegistry,
    collated: CollatedModel,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            model: Model::new(),
            relations: RelationRegistry::with_builtins(RelationConfig::default()),
            collated: CollatedModel::default(),
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    /// Replaces the relation registry with one built from `config`.
    ///
    /// # Panics
    ///
    /// Panics if the protocol is locked, a relation was already created or a
    /// registered type id falls in the new tag range.
    pub fn relation_config(&mut self, config: RelationConfig) -> &mut Self {
        if let Err(error) = self.try_relation_config(config) {
            panic!("Protocol: {}", error);
        }
        self
    }

    /// Registers `schema` under `type_id`.
    ///
    /// # Panics
    ///
    /// Panics if the protocol is locked or the type id is taken or reserved.
    pub fn add_schema(&mut self, type_id: TypeId, schema: Schema) -> &mut Self {
        if let Err(error) = self.try_add_schema(type_id, schema) {
            panic!("Protocol: {}", error);
        }
        self
    }

    pub fn create_relation(&mut self) -> Relation {
        self.check_lock();
        self.relations.create_relation()
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_relation_config(&mut self, config: RelationConfig) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        let relations = RelationRegistry::with_builtins(config);
        if self.relations.len() > relations.len() {
            return Err(ProtocolError::RelationsAlreadyCreated {
                count: self.relations.len() - relations.len(),
            });
        }
        let first_tag_id = relations.config().first_tag_id;
        if let Some(type_id) = self
            .model
            .iter()
            .map(|(type_id, _)| type_id)
            .find(|type_id| u32::from(*type_id) >= first_tag_id)
        {
            return Err(ProtocolError::ReservedTypeId {
                type_id,
                first_tag_id,
            });
        }
        self.relations = relations;
        Ok(self)
    }

    pub fn try_add_schema(&mut self, type_id: TypeId, schema: Schema) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        let first_tag_id = self.relations.config().first_tag_id;
        if u32::from(type_id) >= first_tag_id {
            return Err(ProtocolError::ReservedTypeId {
                type_id,
                first_tag_id,
            });
        }
        if self.model.contains(type_id) {
            return Err(ProtocolError::DuplicateTypeId { type_id });
        }
        self.model.insert(type_id, schema);
        Ok(self)
    }

    /// Collates every registered schema and freezes the protocol
    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;

        self.collated = collate(&self.model).map_err(|CollateError { type_id, source }| {
            ProtocolError::InvalidSchema { type_id, source }
        })?;
        self.locked = true;

        info!(
            "Protocol locked with {} types and {} relations",
            self.collated.len(),
            self.relations.len()
        );
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if already locked or if a schema fails to collate.
    pub fn lock(&mut self) {
        if let Err(error) = self.try_lock() {
            panic!("Protocol: {}", error);
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn try_collated(&self) -> Result<&CollatedModel, ProtocolError> {
        if self.locked {
            Ok(&self.collated)
        } else {
            Err(ProtocolError::NotLocked)
        }
    }

    /// # Panics
    ///
    /// Panics if the protocol is not locked.
    pub fn collated(&self) -> &CollatedModel {
        match self.try_collated() {
            Ok(collated) => collated,
            Err(error) => panic!("Protocol: {}", error),
        }
    }

    /// Checks if protocol is locked without panicking
    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }
}
