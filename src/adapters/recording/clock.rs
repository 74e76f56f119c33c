//! Recording adapter for the `Clock` port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Clock;

/// Wraps a clock and writes every reading to the cassette.
///
/// Readings are stored at millisecond precision, the resolution UIDs use,
/// so cassettes stay readable (`1999-03-17T19:46:40.100Z`).
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingClock {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn Clock>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let reading = self.inner.now();
        let stamp = reading.to_rfc3339_opts(SecondsFormat::Millis, true);
        record_interaction(&self.recorder, "clock", "now", &(), &stamp);
        reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Fixed(DateTime<Utc>);

    impl Clock for Fixed {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn readings_are_stored_to_the_millisecond() {
        let instant = Utc.timestamp_millis_opt(921_700_000_100).unwrap();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("unused.yaml", "clock")));
        let clock = RecordingClock::new(Box::new(Fixed(instant)), Arc::clone(&recorder));

        assert_eq!(clock.now_millis(), 921_700_000_100);
        assert_eq!(clock.now(), instant);

        let recorder = recorder.lock().unwrap();
        assert_eq!(recorder.len(), 2);
    }
}
