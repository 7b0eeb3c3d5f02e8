use std::default::Default;

use patchwork_shared::PoolConfig;

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Bytes reserved up front for each User's outgoing packet
    pub initial_packet_capacity: usize,
    /// Used to configure the buffer pool shared by every User's packet
    pub pool: PoolConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            initial_packet_capacity: 1024,
            pool: PoolConfig::default(),
        }
    }
}
