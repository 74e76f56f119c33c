//! Recording adapter for the `ObjectStore` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ListFuture, ObjectStore};

/// Records object store listings while delegating to an inner implementation.
pub struct RecordingObjectStore {
    inner: Box<dyn ObjectStore>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingObjectStore {
    /// Creates a new recording object store wrapping the given implementation.
    pub fn new(inner: Box<dyn ObjectStore>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ObjectStore for RecordingObjectStore {
    fn list_prefixes<'a>(&'a self, bucket: &'a str, prefix: &'a str) -> ListFuture<'a> {
        Box::pin(async move {
            let result = self.inner.list_prefixes(bucket, prefix).await;
            let input = json!({ "bucket": bucket, "prefix": prefix });
            record_result(&self.recorder, "objects", "list_prefixes", &input, &result);
            result
        })
    }
}
