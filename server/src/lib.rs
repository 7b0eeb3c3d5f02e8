//! # Patchwork Server
//! Turns each tick's field mutations into one packet per connected User,
//! holding only the entity components that User declared interest in.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use patchwork_shared::{
        array_of, boolean, map_of, number, relate, string, Entity, FieldId, PathKey, PatchRecord,
        Protocol, Relation, Schema, Serde, SerdeErr, TypeId, Value,
    };
}

mod awareness;
mod error;
mod server;
mod user;
mod user_scope;

pub use awareness::{Awareness, Interest, InterestFilter};
pub use error::ServerError;
pub use server::{PatchServer, ServerConfig};
pub use user::UserKey;
pub use user_scope::{UserScopeMut, UserScopeRef};
