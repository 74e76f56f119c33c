//! Recording adapter for the `HostResolver` port.

use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{HostResolver, PortError};

/// Records host lookups while delegating to an inner resolver.
pub struct RecordingHostResolver {
    inner: Box<dyn HostResolver>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHostResolver {
    /// Creates a new recording resolver wrapping the given implementation.
    pub fn new(inner: Box<dyn HostResolver>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl HostResolver for RecordingHostResolver {
    fn hostname(&self) -> Result<String, PortError> {
        let result = self.inner.hostname();
        record_result(&self.recorder, "host", "hostname", &(), &result);
        result
    }

    fn resolve_ipv4(&self, name: &str) -> Result<Ipv4Addr, PortError> {
        let result = self.inner.resolve_ipv4(name);
        record_result(&self.recorder, "host", "resolve_ipv4", &json!({ "name": name }), &result);
        result
    }
}
