//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::cassette::CassetteError;
use crate::ports::PortError;
use crate::status::StatusError;
use crate::uid::UidError;

/// Errors surfaced by toolkit operations and CLI commands.
#[derive(Debug, Error)]
pub enum Error {
    /// The command line could not be parsed, or help was requested.
    #[error(transparent)]
    Usage(clap::Error),
    /// UID generation failed.
    #[error(transparent)]
    Uid(#[from] UidError),
    /// A status record was rejected before reaching the store.
    #[error(transparent)]
    Status(#[from] StatusError),
    /// A cassette could not be recorded or replayed.
    #[error(transparent)]
    Cassette(#[from] CassetteError),
    /// An external collaborator failed.
    #[error("{port} call failed: {source}")]
    Port {
        /// Port that failed (e.g. "objects", "documents").
        port: &'static str,
        /// Error reported by the adapter.
        #[source]
        source: PortError,
    },
    /// A required argument for an operation was not supplied.
    #[error("missing argument {argument} for {operation}")]
    MissingArgument {
        /// Argument name.
        argument: &'static str,
        /// Operation that needs it.
        operation: &'static str,
    },
    /// The document store did not take a status record.
    #[error("could not insert status record into {collection}")]
    NotRecorded {
        /// Target collection.
        collection: String,
    },
    /// A directory the operation lists does not exist.
    #[error("directory {0} does not exist")]
    MissingDirectory(PathBuf),
    /// The library config file could not be loaded.
    #[error("failed to load library config {path}: {message}")]
    LibraryConfig {
        /// Config file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl Error {
    /// Adapter for `map_err` that tags a port failure with the port name.
    pub(crate) fn port(port: &'static str) -> impl FnOnce(PortError) -> Self {
        move |source| Self::Port { port, source }
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
