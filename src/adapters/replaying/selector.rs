//! Replaying adapter for the `Selector` port.

use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{PortError, Selector};

/// Serves recorded menu choices from a cassette.
pub struct ReplayingSelector {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingSelector {
    /// Create a replaying selector backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Selector for ReplayingSelector {
    fn select(&self, _title: &str, options: &[String]) -> Result<Option<usize>, PortError> {
        let choice: Option<usize> = replay(&self.replayer, "selector", "select")?;
        match choice {
            Some(index) if index >= options.len() => Err(format!(
                "recorded choice {index} is out of range for {} options",
                options.len()
            )
            .into()),
            other => Ok(other),
        }
    }
}
