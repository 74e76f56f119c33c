//! Filesystem port for directory queries.

use std::path::Path;

use super::PortError;

/// Provides read-only directory access.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError>;
}
