//! Replaying adapter for the Clock port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Clock for ReplayingClock {
    /// # Panics
    ///
    /// Panics if the cassette holds no further clock readings, since the
    /// port has no error channel.
    fn now(&self) -> DateTime<Utc> {
        let output = next_output(&self.replayer, "clock", "now")
            .unwrap_or_else(|e| panic!("clock replay failed: {e}"));
        serde_json::from_value(output)
            .unwrap_or_else(|e| panic!("clock::now: recorded value is not a timestamp: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn make_replayer(outputs: &[&str]) -> Arc<Mutex<CassetteReplayer>> {
        let interactions = outputs
            .iter()
            .zip(0..)
            .map(|(ts, seq)| Interaction {
                seq,
                port: "clock".into(),
                method: "now".into(),
                input: json!(null),
                output: json!(ts),
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "0.1.0".into(),
            interactions,
        };
        Arc::new(Mutex::new(CassetteReplayer::new(&cassette)))
    }

    #[test]
    fn serves_recorded_millis() {
        let clock = ReplayingClock::new(make_replayer(&["1999-03-17T19:46:40.100Z"]));
        assert_eq!(clock.now_millis(), 921_700_000_100);
    }

    #[test]
    #[should_panic(expected = "clock replay failed")]
    fn exhausted_clock_panics() {
        let clock = ReplayingClock::new(make_replayer(&["2024-01-01T00:00:00Z"]));
        let _ = clock.now();
        let _ = clock.now();
    }
}
