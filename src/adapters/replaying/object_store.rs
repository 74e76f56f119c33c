//! Replaying adapter for the `ObjectStore` port.

use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ListFuture, ObjectStore};

/// Serves recorded prefix listings from a cassette.
pub struct ReplayingObjectStore {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingObjectStore {
    /// Create a replaying object store backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ObjectStore for ReplayingObjectStore {
    fn list_prefixes<'a>(&'a self, _bucket: &'a str, _prefix: &'a str) -> ListFuture<'a> {
        let result = replay(&self.replayer, "objects", "list_prefixes");
        Box::pin(async move { result })
    }
}
