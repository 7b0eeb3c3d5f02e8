//! # Patchwork Serde
//! Pooled little-endian byte streams used to encode and decode field patches.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod buffer_pool;
mod error;
mod read_stream;
mod serde;
mod write_stream;

pub use buffer_pool::{BufferPool, PoolConfig, PooledBuffer};
pub use error::SerdeErr;
pub use read_stream::ReadStream;
pub use serde::Serde;
pub use write_stream::WriteStream;
