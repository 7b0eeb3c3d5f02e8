use std::collections::HashSet;

use patchwork_shared::{Entity, TypeId};

use crate::UserKey;

/// A User's interest in one component of one entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interest {
    pub entity: Entity,
    pub type_id: TypeId,
}

impl Interest {
    pub fn new(entity: Entity, type_id: TypeId) -> Self {
        Self { entity, type_id }
    }
}

/// The set of interests a User has declared
#[derive(Clone, Debug, Default)]
pub struct Awareness {
    interests: HashSet<Interest>,
}

impl Awareness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interest(&mut self, interest: Interest) -> bool {
        self.interests.insert(interest)
    }

    pub fn remove_interest(&mut self, interest: &Interest) -> bool {
        self.interests.remove(interest)
    }

    pub fn is_aware(&self, entity: Entity, type_id: TypeId) -> bool {
        self.interests.contains(&Interest::new(entity, type_id))
    }

    pub fn clear(&mut self) {
        self.interests.clear();
    }

    pub fn len(&self) -> usize {
        self.interests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty()
    }
}

/// Decides which changes are replicated to which User
pub trait InterestFilter {
    fn is_visible(&self, user_key: &UserKey, entity: Entity, type_id: TypeId) -> bool;
}

impl<F: Fn(&UserKey, Entity, TypeId) -> bool> InterestFilter for F {
    fn is_visible(&self, user_key: &UserKey, entity: Entity, type_id: TypeId) -> bool {
        self(user_key, entity, type_id)
    }
}
