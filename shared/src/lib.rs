//! # Patchwork Shared
//! Common functionality shared between patchwork-server & patchwork-client crates:
//! entity ids, relations, schema collation, field patching and patch framing.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use patchwork_serde::{
    BufferPool, PoolConfig, PooledBuffer, ReadStream, Serde, SerdeErr, WriteStream,
};

mod connection;
mod model;
mod protocol;
mod types;
mod world;

pub use connection::{
    decoder::PacketDecoder,
    encoder::PacketEncoder,
    error::{DecoderError, EncoderError},
    patch_record::{PatchRecord, MAX_RECORD_FIELD_ID, MAX_RECORD_PATH_LEN},
};
pub use model::{
    collate::{
        collate, collate_root, collate_schema, CollatedModel, FieldLocation, Model, ModelNode,
        NodeKind,
    },
    data_type::{boolean, boolean_with, number, number_with, string, string_with, DataType},
    error::{CollateError, PatchError, SchemaError},
    patch::{patch, Instance, PathKey},
    schema::{array_of, map_of, Field, Schema},
    value::{Value, MAX_VALUE_DEPTH},
};
pub use protocol::{Protocol, ProtocolError, ProtocolPlugin};
pub use types::{FieldId, TypeId};
pub use world::{
    entity::entity::{
        pack, unpack_hi, unpack_lo, Entity, HI_EXTENT, HI_MASK, LO_EXTENT, LO_MASK,
    },
    relation::{
        error::RelationError,
        relation::{is_relationship, relate, Relation, RelationConfig, RelationRegistry, RelationTarget},
    },
};
