use patchwork_shared::{Entity, TypeId};

use crate::{awareness::Interest, server::PatchServer, UserKey};

pub struct UserScopeRef<'s> {
    server: &'s PatchServer,
    key: UserKey,
}

impl<'s> UserScopeRef<'s> {
    pub(crate) fn new(server: &'s PatchServer, key: &UserKey) -> Self {
        Self { server, key: *key }
    }

    /// Returns true if the User's scope contains the Entity's component
    pub fn has(&self, entity: Entity, type_id: TypeId) -> bool {
        self.server.user_scope_has(&self.key, entity, type_id)
    }
}

pub struct UserScopeMut<'s> {
    server: &'s mut PatchServer,
    key: UserKey,
}

impl<'s> UserScopeMut<'s> {
    pub(crate) fn new(server: &'s mut PatchServer, key: &UserKey) -> Self {
        Self { server, key: *key }
    }

    /// Returns true if the User's scope contains the Entity's component
    pub fn has(&self, entity: Entity, type_id: TypeId) -> bool {
        self.server.user_scope_has(&self.key, entity, type_id)
    }

    /// Adds an Entity's component to the User's scope
    pub fn include(&mut self, entity: Entity, type_id: TypeId) -> &mut Self {
        self.server
            .user_scope_set(&self.key, Interest::new(entity, type_id), true);

        self
    }

    /// Removes an Entity's component from the User's scope
    pub fn exclude(&mut self, entity: Entity, type_id: TypeId) -> &mut Self {
        self.server
            .user_scope_set(&self.key, Interest::new(entity, type_id), false);

        self
    }

    /// Removes everything from the User's scope
    pub fn clear(&mut self) -> &mut Self {
        self.server.user_scope_clear(&self.key);

        self
    }
}
