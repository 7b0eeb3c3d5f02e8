//! # Patchwork Client
//! Decodes the patch packets sent by a patchwork-server and applies each
//! record to a local pool of entity component instances.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use patchwork_shared::{
        array_of, boolean, map_of, number, string, Entity, FieldId, PathKey, Protocol, Schema,
        TypeId, Value,
    };
}

mod client;
mod error;
mod events;

pub use client::{ClientConfig, PatchClient};
pub use error::ClientError;
pub use events::PatchEvent;
