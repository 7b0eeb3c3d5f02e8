use std::collections::HashMap;

use patchwork_client::{ClientConfig, ClientError, PatchClient, PatchEvent};
use patchwork_server::{PatchServer, UserKey};
use patchwork_shared::Protocol;

/// One PatchClient per connected User
#[derive(Default)]
pub struct TestClients {
    clients: HashMap<UserKey, PatchClient>,
}

impl TestClients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a User to the server and a matching client
    pub fn connect(&mut self, server: &mut PatchServer, protocol: Protocol) -> UserKey {
        let user_key = server.add_user();
        self.clients
            .insert(user_key, PatchClient::new(ClientConfig::default(), protocol));
        user_key
    }

    pub fn get(&self, user_key: &UserKey) -> &PatchClient {
        self.clients
            .get(user_key)
            .unwrap_or_else(|| panic!("no client for {:?}", user_key))
    }
}

/// Flushes the server and delivers every packet to its client.
/// Returns the events each client produced, keyed by user.
pub fn exchange_packets(
    server: &mut PatchServer,
    clients: &mut TestClients,
) -> Result<HashMap<UserKey, Vec<PatchEvent>>, ClientError> {
    let mut packets = Vec::new();
    server.flush(|user_key, bytes| packets.push((*user_key, bytes.to_vec())));

    let mut events = HashMap::new();
    for (user_key, bytes) in packets {
        let Some(client) = clients.clients.get_mut(&user_key) else {
            continue;
        };
        events.insert(user_key, client.receive(&bytes)?);
    }
    Ok(events)
}
