pub mod api;
pub mod export;
pub mod filter;
pub mod format;
pub mod list_controller;
pub mod list_view;
pub mod normalize;
pub mod predicate;
pub mod store;
