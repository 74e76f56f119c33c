//! Sleeper port used for backoff delays.

use std::time::Duration;

/// Blocks the calling thread for a duration.
pub trait Sleeper: Send + Sync {
    /// Sleeps for `duration`.
    fn sleep(&self, duration: Duration);
}
