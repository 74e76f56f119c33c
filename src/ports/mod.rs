//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the toolkit and an external
//! system (time, sleeping, host naming, filesystem, object store, document
//! store, interactive selection). Implementations live in `src/adapters/`.

pub mod clock;
pub mod document_store;
pub mod filesystem;
pub mod host;
pub mod object_store;
pub mod selector;
pub mod sleeper;

pub use clock::Clock;
pub use document_store::{DocumentStore, Filter};
pub use filesystem::FileSystem;
pub use host::HostResolver;
pub use object_store::{ListFuture, ObjectStore};
pub use selector::Selector;
pub use sleeper::Sleeper;

/// Error type returned by fallible port methods.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
