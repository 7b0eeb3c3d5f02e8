pub mod entity;
pub mod relation;
