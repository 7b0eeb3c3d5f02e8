use log::info;

use crate::world::entity::entity::{pack, unpack_hi, unpack_lo, Entity, HI_MASK, LO_MASK};

use super::error::RelationError;

/// Contains Config properties which will be used by a RelationRegistry
#[derive(Clone, Debug)]
pub struct RelationConfig {
    /// First id handed out to relation tag components. Schema type ids must
    /// stay below this value so the two never collide in the low bits.
    pub first_tag_id: u32,
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self { first_tag_id: 1024 }
    }
}

/// A registered relationship kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Relation {
    /// Stored in the high bits of every term built from this relation
    pub relation_id: u32,
    /// Tag component id standing in for this relation when it is itself the
    /// target of another relation
    pub relation_term: u32,
}

/// The thing a relation points at
#[derive(Clone, Copy, Debug)]
pub enum RelationTarget<'r> {
    Entity(Entity),
    Relation(&'r Relation),
}

impl From<Entity> for RelationTarget<'_> {
    fn from(entity: Entity) -> Self {
        RelationTarget::Entity(entity)
    }
}

impl<'r> From<&'r Relation> for RelationTarget<'r> {
    fn from(relation: &'r Relation) -> Self {
        RelationTarget::Relation(relation)
    }
}

/// Builds the relationship term `relation(target)`: the target's slot (or tag
/// id) in the low bits, the relation id in the high bits.
pub fn relate<'r>(relation: &Relation, target: impl Into<RelationTarget<'r>>) -> Entity {
    let lo = match target.into() {
        RelationTarget::Entity(entity) => unpack_lo(entity.to_u32()),
        RelationTarget::Relation(other) => other.relation_term,
    };
    Entity::from_u32(pack(lo, relation.relation_id))
}

/// True if the term was built by a relation
pub fn is_relationship(term: Entity) -> bool {
    unpack_hi(term.to_u32()) > 0
}

/// Append-only table of relations, indexed by relation id
pub struct RelationRegistry {
    config: RelationConfig,
    // slot 0 is never used, relation ids start at 1
    relations: Vec<Option<Relation>>,
    next_tag_id: u32,
}

impl Default for RelationRegistry {
    fn default() -> Self {
        Self::new(RelationConfig::default())
    }
}

impl RelationRegistry {
    pub fn new(config: RelationConfig) -> Self {
        let next_tag_id = config.first_tag_id;
        Self {
            config,
            relations: vec![None],
            next_tag_id,
        }
    }

    /// Registry with `ChildOf` (id 1) and `Without` (id 2) already registered
    pub fn with_builtins(config: RelationConfig) -> Self {
        let mut registry = Self::new(config);
        registry.create_relation();
        registry.create_relation();
        registry
    }

    pub fn config(&self) -> &RelationConfig {
        &self.config
    }

    /// Registers a new relation.
    ///
    /// # Panics
    ///
    /// Panics if relation ids or tag ids are exhausted.
    pub fn create_relation(&mut self) -> Relation {
        match self.try_create_relation() {
            Ok(relation) => relation,
            Err(error) => panic!("RelationRegistry: {}", error),
        }
    }

    pub fn try_create_relation(&mut self) -> Result<Relation, RelationError> {
        let relation_id = self.relations.len() as u32;
        if relation_id > HI_MASK {
            return Err(RelationError::CapacityExhausted {
                relation_id,
                limit: HI_MASK,
            });
        }
        let relation_term = self.next_tag_id;
        if relation_term > LO_MASK {
            return Err(RelationError::TagIdsExhausted {
                tag_id: relation_term,
                limit: LO_MASK,
            });
        }

        let relation = Relation {
            relation_id,
            relation_term,
        };
        self.next_tag_id += 1;
        self.relations.push(Some(relation));

        info!(
            "RelationRegistry: registered relation {} with tag {}",
            relation_id, relation_term
        );
        Ok(relation)
    }

    pub fn get(&self, relation_id: u32) -> Option<&Relation> {
        self.relations
            .get(relation_id as usize)
            .and_then(Option::as_ref)
    }

    /// The relation a term was built from, if any
    pub fn relation_of(&self, term: Entity) -> Option<&Relation> {
        if !is_relationship(term) {
            return None;
        }
        self.get(unpack_hi(term.to_u32()))
    }

    pub fn len(&self) -> usize {
        self.relations.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn child_of(&self) -> Option<&Relation> {
        self.get(1)
    }

    pub fn without(&self) -> Option<&Relation> {
        self.get(2)
    }
}
