use std::collections::HashMap;

use log::{debug, info, warn};

use patchwork_shared::{BufferPool, CollatedModel, Entity, PatchRecord, Protocol, TypeId};

use crate::{
    awareness::{Awareness, Interest, InterestFilter},
    error::ServerError,
    user::User,
    user_scope::{UserScopeMut, UserScopeRef},
    ServerConfig, UserKey,
};

/// Turns each tick's field mutations into one packet per User, containing
/// only the mutations that User is interested in.
pub struct PatchServer {
    config: ServerConfig,
    protocol: Protocol,
    pool: BufferPool,
    users: HashMap<UserKey, User>,
    next_user_key: u64,
}

impl PatchServer {
    /// Create a new Server. Locks the Protocol if that hasn't happened yet.
    ///
    /// # Panics
    ///
    /// Panics if the Protocol needs locking and one of its schemas is invalid.
    pub fn new(config: ServerConfig, mut protocol: Protocol) -> Self {
        if !protocol.is_locked() {
            protocol.lock();
        }
        let pool = BufferPool::new(config.pool.clone());

        Self {
            config,
            protocol,
            pool,
            users: HashMap::new(),
            next_user_key: 0,
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    fn model(&self) -> &CollatedModel {
        self.protocol.collated()
    }

    // Users

    pub fn add_user(&mut self) -> UserKey {
        let user_key = UserKey::new(self.next_user_key);
        self.next_user_key += 1;

        self.users.insert(
            user_key,
            User::new(self.pool.clone(), self.config.initial_packet_capacity),
        );
        info!("PatchServer: added User {:?}", user_key);

        user_key
    }

    /// Removes a User. Anything queued but not yet flushed is dropped.
    pub fn remove_user(&mut self, user_key: &UserKey) -> Result<(), ServerError> {
        self.users
            .remove(user_key)
            .map(|_| info!("PatchServer: removed User {:?}", user_key))
            .ok_or(ServerError::UserNotFound {
                user_key: *user_key,
            })
    }

    pub fn user_exists(&self, user_key: &UserKey) -> bool {
        self.users.contains_key(user_key)
    }

    pub fn user_keys(&self) -> Vec<UserKey> {
        self.users.keys().copied().collect()
    }

    pub fn users_count(&self) -> usize {
        self.users.len()
    }

    // Scopes

    /// Returns a UserScopeRef, which is used to query which Entity components
    /// a given User is interested in
    pub fn user_scope(&'_ self, user_key: &UserKey) -> UserScopeRef<'_> {
        if self.users.contains_key(user_key) {
            return UserScopeRef::new(self, user_key);
        }
        panic!("No User exists for given Key!");
    }

    /// Returns a UserScopeMut, which is used to include/exclude Entity
    /// components for a given User
    pub fn user_scope_mut(&'_ mut self, user_key: &UserKey) -> UserScopeMut<'_> {
        if self.users.contains_key(user_key) {
            return UserScopeMut::new(self, user_key);
        }
        panic!("No User exists for given Key!");
    }

    pub fn try_user_scope_mut(&'_ mut self, user_key: &UserKey) -> Result<UserScopeMut<'_>, ServerError> {
        if self.users.contains_key(user_key) {
            return Ok(UserScopeMut::new(self, user_key));
        }
        Err(ServerError::UserNotFound {
            user_key: *user_key,
        })
    }

    pub(crate) fn user_scope_has(&self, user_key: &UserKey, entity: Entity, type_id: TypeId) -> bool {
        self.users
            .get(user_key)
            .is_some_and(|user| user.awareness.is_aware(entity, type_id))
    }

    pub(crate) fn user_scope_set(&mut self, user_key: &UserKey, interest: Interest, is_contained: bool) {
        let Some(user) = self.users.get_mut(user_key) else {
            return;
        };
        if is_contained {
            user.awareness.add_interest(interest);
        } else {
            user.awareness.remove_interest(&interest);
        }
    }

    pub(crate) fn user_scope_clear(&mut self, user_key: &UserKey) {
        if let Some(user) = self.users.get_mut(user_key) {
            user.awareness.clear();
        }
    }

    // Mutations

    /// Checks a record against the collated model: the field must exist, the
    /// traversal path must cover every array/map on the way, and the value
    /// must have the declared shape.
    pub fn validate(&self, index: usize, record: &PatchRecord) -> Result<(), ServerError> {
        let location = self
            .model()
            .locate(record.type_id, record.field_id)
            .map_err(|source| ServerError::InvalidField {
                index,
                entity: record.entity,
                source,
            })?;

        if location.path_len != record.path.len() {
            return Err(ServerError::PathLengthMismatch {
                index,
                type_id: record.type_id,
                field_id: record.field_id,
                expected: location.path_len,
                actual: record.path.len(),
            });
        }

        if !record.value.conforms_to(location.node) {
            return Err(ServerError::ValueMismatch {
                index,
                type_id: record.type_id,
                field_id: record.field_id,
                key: location.node.key.clone(),
                actual: record.value.kind_name(),
            });
        }

        record
            .check()
            .map_err(|source| ServerError::Encoder { index, source })
    }

    /// Queues each mutation for every User whose scope includes the mutated
    /// entity component. Records keep their order within each User's packet.
    ///
    /// The whole batch is validated first, so an invalid record leaves every
    /// packet untouched.
    pub fn send_mutations(&mut self, records: &[PatchRecord]) -> Result<usize, ServerError> {
        self.enqueue(records, |_, awareness, record| {
            awareness.is_aware(record.entity, record.type_id)
        })
    }

    /// Like [`PatchServer::send_mutations`], but visibility is decided by an
    /// external filter instead of the Users' scopes
    pub fn send_mutations_filtered(
        &mut self,
        records: &[PatchRecord],
        filter: &dyn InterestFilter,
    ) -> Result<usize, ServerError> {
        self.enqueue(records, |user_key, _, record| {
            filter.is_visible(user_key, record.entity, record.type_id)
        })
    }

    fn enqueue<F>(&mut self, records: &[PatchRecord], visible: F) -> Result<usize, ServerError>
    where
        F: Fn(&UserKey, &Awareness, &PatchRecord) -> bool,
    {
        for (index, record) in records.iter().enumerate() {
            if let Err(error) = self.validate(index, record) {
                warn!("PatchServer: rejecting mutation batch: {}", error);
                return Err(error);
            }
        }

        let mut queued = 0;
        for (user_key, user) in self.users.iter_mut() {
            for (index, record) in records.iter().enumerate() {
                if !visible(user_key, &user.awareness, record) {
                    continue;
                }
                user.encoder
                    .write_record(record)
                    .map_err(|source| ServerError::Encoder { index, source })?;
                queued += 1;
            }
        }

        Ok(queued)
    }

    /// Hands every non-empty packet to `send`, then resets it for the next
    /// tick. Users are visited in random order so none is always first.
    pub fn flush<F: FnMut(&UserKey, &[u8])>(&mut self, mut send: F) {
        let mut user_keys: Vec<UserKey> = self.users.keys().copied().collect();
        fastrand::shuffle(&mut user_keys);

        for user_key in user_keys {
            let Some(user) = self.users.get_mut(&user_key) else {
                continue;
            };
            if user.encoder.is_empty() {
                continue;
            }
            let record_count = user.encoder.record_count();
            let bytes = user.encoder.finish();
            debug!(
                "PatchServer: sending {} records ({} bytes) to User {:?}",
                record_count,
                bytes.len(),
                user_key
            );
            send(&user_key, bytes);
            user.encoder.reset();
        }
    }

    /// Number of records queued for a User since the last flush
    pub fn queued_records(&self, user_key: &UserKey) -> Option<u32> {
        self.users
            .get(user_key)
            .map(|user| user.encoder.record_count())
    }
}

impl InterestFilter for PatchServer {
    fn is_visible(&self, user_key: &UserKey, entity: Entity, type_id: TypeId) -> bool {
        self.user_scope_has(user_key, entity, type_id)
    }
}
