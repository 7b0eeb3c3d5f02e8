use std::collections::HashMap;

use log::{debug, warn};

use patchwork_shared::{
    patch, Entity, PacketDecoder, PatchError, PatchRecord, Protocol, TypeId, Value,
};

use crate::{ClientConfig, ClientError, PatchEvent};

/// Keeps one [`Value`] per replicated entity component and applies the
/// patches a server sends for them
pub struct PatchClient {
    config: ClientConfig,
    protocol: Protocol,
    instances: HashMap<(Entity, TypeId), Value>,
}

impl PatchClient {
    /// Create a new Client. Locks the Protocol if that hasn't happened yet.
    ///
    /// # Panics
    ///
    /// Panics if the Protocol needs locking and one of its schemas is invalid.
    pub fn new(config: ClientConfig, mut protocol: Protocol) -> Self {
        if !protocol.is_locked() {
            protocol.lock();
        }

        Self {
            config,
            protocol,
            instances: HashMap::new(),
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    // Instances

    pub fn instance(&self, entity: Entity, type_id: TypeId) -> Option<&Value> {
        self.instances.get(&(entity, type_id))
    }

    pub fn insert_instance(&mut self, entity: Entity, type_id: TypeId, value: Value) -> Option<Value> {
        self.instances.insert((entity, type_id), value)
    }

    pub fn remove_instance(&mut self, entity: Entity, type_id: TypeId) -> Option<Value> {
        self.instances.remove(&(entity, type_id))
    }

    pub fn instances_count(&self) -> usize {
        self.instances.len()
    }

    // Packets

    /// Applies every record of a packet in order.
    ///
    /// Stops at the first record that cannot be read or applied. Records
    /// before it stay applied.
    pub fn receive(&mut self, bytes: &[u8]) -> Result<Vec<PatchEvent>, ClientError> {
        let decoder = PacketDecoder::new(bytes)
            .map_err(|source| ClientError::Decoder { applied: 0, source })?;
        let mut events = Vec::with_capacity((decoder.record_count() as usize).min(bytes.len()));

        for (record_index, record) in decoder.enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(source) => {
                    warn!("PatchClient: dropping rest of packet: {}", source);
                    return Err(ClientError::Decoder {
                        applied: events.len(),
                        source,
                    });
                }
            };
            events.push(self.apply(record_index, record)?);
        }

        debug!("PatchClient: applied {} records", events.len());
        Ok(events)
    }

    /// Replaces the field addressed by `record` in the matching local instance
    pub fn apply(&mut self, record_index: usize, record: PatchRecord) -> Result<PatchEvent, ClientError> {
        let PatchRecord {
            entity,
            type_id,
            field_id,
            path,
            value,
        } = record;

        let model = self.protocol.collated();
        let location = model
            .locate(type_id, field_id)
            .map_err(|source| ClientError::Patch {
                record_index,
                entity,
                source,
            })?;
        if !value.conforms_to(location.node) {
            return Err(ClientError::ValueRejected {
                record_index,
                type_id,
                field_id,
                actual: value.kind_name(),
            });
        }

        // a fresh instance is only stored once its first patch succeeds
        let mut created = None;
        let instance = match self.instances.get_mut(&(entity, type_id)) {
            Some(instance) => instance,
            None => {
                if !self.config.auto_instantiate {
                    return Err(ClientError::UnknownInstance {
                        record_index,
                        entity,
                        type_id,
                    });
                }
                let Some(schema) = self.protocol.model.get(type_id) else {
                    return Err(ClientError::Patch {
                        record_index,
                        entity,
                        source: PatchError::TypeNotFound { type_id },
                    });
                };
                created.insert(Value::from_schema(schema))
            }
        };

        let (replaced, key) = patch(model, type_id, field_id, instance, &path, |target, key| {
            (target.set_field(key, value), key.to_string())
        })
        .map_err(|source| ClientError::Patch {
            record_index,
            entity,
            source,
        })?;
        if !replaced {
            return Err(ClientError::Patch {
                record_index,
                entity,
                source: PatchError::InstanceMismatch { key },
            });
        }

        if let Some(instance) = created {
            debug!("PatchClient: instantiating {:?} of type {}", entity, type_id);
            self.instances.insert((entity, type_id), instance);
        }

        Ok(PatchEvent {
            entity,
            type_id,
            field_id,
            key,
            path,
        })
    }
}
