//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::document_store::LiveDocumentStore;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::host::LiveHostResolver;
use crate::adapters::live::object_store::{LiveObjectStore, DEFAULT_S3_ENDPOINT};
use crate::adapters::live::selector::TerminalSelector;
use crate::adapters::live::sleeper::ThreadSleeper;
use crate::adapters::recording::{
    RecordingClock, RecordingDocumentStore, RecordingFileSystem, RecordingHostResolver,
    RecordingObjectStore, RecordingSelector,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingDocumentStore, ReplayingFileSystem, ReplayingHostResolver,
    ReplayingObjectStore, ReplayingSelector, SkippingSleeper,
};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::cassette::CassetteError;
use crate::ports::{
    Clock, DocumentStore, FileSystem, HostResolver, ObjectStore, Selector, Sleeper,
};

/// Where the live adapters point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL of the S3-compatible object store.
    pub s3_endpoint: String,
    /// Directory holding the document store's collections.
    pub store_dir: PathBuf,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { s3_endpoint: DEFAULT_S3_ENDPOINT.into(), store_dir: PathBuf::from("nbstore") }
    }
}

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Sleeper used for backoff.
    pub sleeper: Box<dyn Sleeper>,
    /// Resolver for the local host's address.
    pub host: Box<dyn HostResolver>,
    /// Filesystem for directory listings.
    pub fs: Box<dyn FileSystem>,
    /// Object store holding the released images.
    pub objects: Box<dyn ObjectStore>,
    /// Document store holding metadata and status records.
    pub documents: Box<dyn DocumentStore>,
    /// Interactive menu.
    pub selector: Box<dyn Selector>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live(endpoints: &Endpoints) -> Self {
        Self {
            clock: Box::new(LiveClock),
            sleeper: Box::new(ThreadSleeper),
            host: Box::new(LiveHostResolver),
            fs: Box::new(LiveFileSystem),
            objects: Box::new(LiveObjectStore::new(endpoints.s3_endpoint.clone())),
            documents: Box::new(LiveDocumentStore::new(endpoints.store_dir.clone())),
            selector: Box::new(TerminalSelector),
        }
    }

    /// Creates a live context whose interactions are captured by `session`.
    ///
    /// Sleeps are not recorded; replay skips them.
    #[must_use]
    pub fn recording(endpoints: &Endpoints, session: &RecordingSession) -> Self {
        Self::live(endpoints).recorded_by(session)
    }

    /// Wraps every recordable port of this context in a recording adapter.
    #[must_use]
    pub fn recorded_by(self, session: &RecordingSession) -> Self {
        Self {
            clock: Box::new(RecordingClock::new(self.clock, session.recorder())),
            sleeper: self.sleeper,
            host: Box::new(RecordingHostResolver::new(self.host, session.recorder())),
            fs: Box::new(RecordingFileSystem::new(self.fs, session.recorder())),
            objects: Box::new(RecordingObjectStore::new(self.objects, session.recorder())),
            documents: Box::new(RecordingDocumentStore::new(self.documents, session.recorder())),
            selector: Box::new(RecordingSelector::new(self.selector, session.recorder())),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// All ports share one replayer; each port/method pair keeps its own
    /// cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, CassetteError> {
        let cassette = Cassette::load(path)?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(cassette)));
        Self {
            clock: Box::new(ReplayingClock::new(Arc::clone(&replayer))),
            sleeper: Box::new(SkippingSleeper),
            host: Box::new(ReplayingHostResolver::new(Arc::clone(&replayer))),
            fs: Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
            objects: Box::new(ReplayingObjectStore::new(Arc::clone(&replayer))),
            documents: Box::new(ReplayingDocumentStore::new(Arc::clone(&replayer))),
            selector: Box::new(ReplayingSelector::new(replayer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn replaying_context_serves_each_port() {
        let dir = std::env::temp_dir().join("neuronbridge_ctx_replay");
        let path = dir.join("ctx.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "ctx");
        recorder.record("clock", "now", json!(null), json!("2024-06-15T10:30:00Z"));
        recorder.record("host", "hostname", json!(null), json!({"Ok": "labhost"}));
        recorder.record("selector", "select", json!({}), json!({"Ok": 1}));
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(ctx.host.hostname().unwrap(), "labhost");
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(ctx.selector.select("Pick", &options).unwrap(), Some(1));
        assert!(ctx.documents.distinct("c", "f", None).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_cassette_is_an_error() {
        let result = ServiceContext::replaying(Path::new("/nonexistent/cassette.yaml"));
        assert!(matches!(result, Err(CassetteError::Io { .. })));
    }
}
