//! Recording adapter for the `Selector` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{PortError, Selector};

/// Records menu choices while delegating to an inner selector.
pub struct RecordingSelector {
    inner: Box<dyn Selector>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSelector {
    /// Creates a new recording selector wrapping the given implementation.
    pub fn new(inner: Box<dyn Selector>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Selector for RecordingSelector {
    fn select(&self, title: &str, options: &[String]) -> Result<Option<usize>, PortError> {
        let result = self.inner.select(title, options);
        let input = json!({ "title": title, "options": options });
        record_result(&self.recorder, "selector", "select", &input, &result);
        result
    }
}
