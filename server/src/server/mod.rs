mod patch_server;
mod server_config;

pub use patch_server::PatchServer;
pub use server_config::ServerConfig;
