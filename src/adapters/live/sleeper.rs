//! Live sleeper that blocks the current thread.

use std::time::Duration;

use crate::ports::Sleeper;

/// Sleeps with [`std::thread::sleep`].
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
