//! Common types and traits for all collections

pub mod resource;

pub use resource::Resource;
