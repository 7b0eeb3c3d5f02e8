use patchwork_shared::{BufferPool, PacketEncoder};

use crate::awareness::Awareness;

// UserKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct UserKey(u64);

impl UserKey {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

// User
pub(crate) struct User {
    pub(crate) awareness: Awareness,
    pub(crate) encoder: PacketEncoder,
}

impl User {
    pub(crate) fn new(pool: BufferPool, initial_packet_capacity: usize) -> Self {
        Self {
            awareness: Awareness::new(),
            encoder: PacketEncoder::new(pool, initial_packet_capacity),
        }
    }
}
