mod client_config;
mod patch_client;

pub use client_config::ClientConfig;
pub use patch_client::PatchClient;
