//! Recording adapter for the `DocumentStore` port.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{DocumentStore, Filter, PortError};

/// Records document store calls while delegating to an inner implementation.
pub struct RecordingDocumentStore {
    inner: Box<dyn DocumentStore>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingDocumentStore {
    /// Creates a new recording document store wrapping the given implementation.
    pub fn new(inner: Box<dyn DocumentStore>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl DocumentStore for RecordingDocumentStore {
    fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Value>, PortError> {
        let result = self.inner.distinct(collection, field, filter);
        let input = json!({ "collection": collection, "field": field, "filter": filter });
        record_result(&self.recorder, "documents", "distinct", &input, &result);
        result
    }

    fn insert_one(&self, collection: &str, document: &Value) -> Result<Option<String>, PortError> {
        let result = self.inner.insert_one(collection, document);
        let input = json!({ "collection": collection, "document": document });
        record_result(&self.recorder, "documents", "insert_one", &input, &result);
        result
    }
}
