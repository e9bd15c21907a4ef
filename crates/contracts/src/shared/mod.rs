//! Types shared between the list engine and the REST boundary

pub mod envelope;
pub mod field;
pub mod filter;
pub mod mapping;
pub mod record;
