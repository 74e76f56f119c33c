//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{next_output, replay};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{FileSystem, PortError};

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl FileSystem for ReplayingFileSystem {
    /// # Panics
    ///
    /// Panics if the cassette has no matching `is_dir` answer.
    fn is_dir(&self, _path: &Path) -> bool {
        let output = next_output(&self.replayer, "fs", "is_dir")
            .unwrap_or_else(|e| panic!("fs replay failed: {e}"));
        output.as_bool().unwrap_or_else(|| panic!("fs::is_dir: expected boolean, got {output}"))
    }

    fn list_dir(&self, _path: &Path) -> Result<Vec<String>, PortError> {
        replay(&self.replayer, "fs", "list_dir")
    }
}
