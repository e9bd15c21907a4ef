//! Client-side list engine of the operations board
//!
//! Fetched collections are filtered, sorted and paged in memory; edits are
//! applied optimistically and reconciled against the REST backend.

pub mod shared;

pub use shared::list_controller::{ControllerError, ListController};
