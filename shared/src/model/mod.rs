pub mod collate;
pub mod data_type;
pub mod error;
pub mod patch;
pub mod schema;
pub mod value;
