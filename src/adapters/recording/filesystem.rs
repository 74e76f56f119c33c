//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{FileSystem, PortError};

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn of(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

impl FileSystem for RecordingFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, "fs", "is_dir", &PathInput::of(path), &result);
        result
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let result = self.inner.list_dir(path);
        record_result(&self.recorder, "fs", "list_dir", &PathInput::of(path), &result);
        result
    }
}
