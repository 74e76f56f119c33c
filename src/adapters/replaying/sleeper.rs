//! Sleeper used during replay.

use std::time::Duration;

use tracing::trace;

use crate::ports::Sleeper;

/// Skips every sleep; replayed clocks already encode elapsed time.
pub struct SkippingSleeper;

impl Sleeper for SkippingSleeper {
    fn sleep(&self, duration: Duration) {
        trace!(?duration, "skipping sleep during replay");
    }
}
