//! Live adapters for real external interactions.

pub mod clock;
pub mod document_store;
pub mod filesystem;
pub mod host;
pub mod object_store;
pub mod selector;
pub mod sleeper;
