pub mod error;
pub mod relation;
