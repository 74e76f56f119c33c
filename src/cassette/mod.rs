//! Cassette format for recording and replaying port interactions.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

use thiserror::Error;

/// Errors raised while writing or replaying cassettes.
#[derive(Debug, Error)]
pub enum CassetteError {
    /// Reading or writing the cassette file failed.
    #[error("cassette I/O failed for {path}: {source}")]
    Io {
        /// File being read or written.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The cassette YAML could not be parsed or produced.
    #[error("cassette YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// No interaction was ever recorded for this port/method pair.
    #[error("no interactions recorded for {port}::{method}; available: [{available}]")]
    Unrecorded {
        /// Port that was called.
        port: String,
        /// Method that was called.
        method: String,
        /// Comma-separated list of recorded port::method pairs.
        available: String,
    },
    /// Every recorded interaction for this pair has already been served.
    #[error("cassette exhausted: all {count} interactions for {port}::{method} consumed")]
    Exhausted {
        /// Port that was called.
        port: String,
        /// Method that was called.
        method: String,
        /// Number of interactions that were recorded.
        count: usize,
    },
    /// A recorded output did not have the expected shape.
    #[error("malformed {port}::{method} output: {message}")]
    Malformed {
        /// Port that was called.
        port: String,
        /// Method that was called.
        method: String,
        /// What was wrong with it.
        message: String,
    },
    /// The recorder is still shared by live adapters.
    #[error("recording session still in use")]
    InUse,
}
