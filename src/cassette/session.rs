//! Recording session shared by every recording adapter.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use super::CassetteError;

/// Owns the recorder that all recording adapters of one run write into.
///
/// The cassette lands at `<dir>/<timestamp>.cassette.yaml`.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Create a session that will write into `dir`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let path = dir.join(format!("{timestamp}.cassette.yaml"));
        Self::at(path, format!("neuronbridge-{timestamp}"))
    }

    /// Create a session writing to an explicit cassette path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { recorder: Arc::new(Mutex::new(CassetteRecorder::new(path, name))) }
    }

    /// Handle given to each recording adapter.
    #[must_use]
    pub fn recorder(&self) -> Arc<Mutex<CassetteRecorder>> {
        Arc::clone(&self.recorder)
    }

    /// Write the cassette to disk.
    ///
    /// Every context built from this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns [`CassetteError::InUse`] if adapters still hold the recorder,
    /// or an I/O error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, CassetteError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| CassetteError::InUse)?
            .into_inner()
            .map_err(|_| CassetteError::InUse)?;
        recorder.finish()
    }
}
