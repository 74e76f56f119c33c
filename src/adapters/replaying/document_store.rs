//! Replaying adapter for the `DocumentStore` port.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{DocumentStore, Filter, PortError};

/// Serves recorded document store results from a cassette.
pub struct ReplayingDocumentStore {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingDocumentStore {
    /// Create a replaying document store backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl DocumentStore for ReplayingDocumentStore {
    fn distinct(
        &self,
        _collection: &str,
        _field: &str,
        _filter: Option<&Filter>,
    ) -> Result<Vec<Value>, PortError> {
        replay(&self.replayer, "documents", "distinct")
    }

    fn insert_one(&self, _collection: &str, _document: &Value) -> Result<Option<String>, PortError> {
        replay(&self.replayer, "documents", "insert_one")
    }
}
