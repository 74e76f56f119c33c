//! Replaying adapter for the `HostResolver` port.

use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{HostResolver, PortError};

/// Serves recorded host lookups from a cassette.
pub struct ReplayingHostResolver {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingHostResolver {
    /// Create a replaying resolver backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl HostResolver for ReplayingHostResolver {
    fn hostname(&self) -> Result<String, PortError> {
        replay(&self.replayer, "host", "hostname")
    }

    fn resolve_ipv4(&self, _name: &str) -> Result<Ipv4Addr, PortError> {
        replay(&self.replayer, "host", "resolve_ipv4")
    }
}
