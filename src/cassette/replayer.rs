//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};
use super::CassetteError;

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns [`CassetteError::Unrecorded`] if the pair never appears in the
    /// cassette, or [`CassetteError::Exhausted`] once every recorded
    /// interaction for it has been served.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
    ) -> Result<&Interaction, CassetteError> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(CassetteError::Unrecorded {
                port: port.to_string(),
                method: method.to_string(),
                available: available.join(", "),
            });
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        if *cursor >= queue.len() {
            return Err(CassetteError::Exhausted {
                port: port.to_string(),
                method: method.to_string(),
                count: queue.len(),
            });
        }

        let interaction = &queue[*cursor];
        *cursor += 1;
        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "0.1.0".into(),
            interactions,
        }
    }

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!(null), output }
    }

    #[test]
    fn interleaved_ports_replay_in_their_own_order() {
        let cassette = make_cassette(vec![
            interaction(0, "clock", "now", json!("2024-01-01T00:00:00Z")),
            interaction(1, "selector", "select", json!({"Ok": 2})),
            interaction(2, "clock", "now", json!("2024-01-01T00:00:01Z")),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("clock", "now").unwrap().seq, 0);
        assert_eq!(replayer.next_interaction("clock", "now").unwrap().seq, 2);
        let choice = replayer.next_interaction("selector", "select").unwrap();
        assert_eq!(choice.output, json!({"Ok": 2}));
    }

    #[test]
    fn exhausted_stream_is_an_error() {
        let cassette = make_cassette(vec![interaction(0, "host", "hostname", json!({"Ok": "a"}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        replayer.next_interaction("host", "hostname").unwrap();

        let err = replayer.next_interaction("host", "hostname").unwrap_err();
        assert!(matches!(err, CassetteError::Exhausted { count: 1, .. }));
    }

    #[test]
    fn unknown_port_lists_available_pairs() {
        let cassette = make_cassette(vec![interaction(0, "clock", "now", json!(null))]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let err = replayer.next_interaction("documents", "distinct").unwrap_err();
        assert!(err.to_string().contains("clock::now"));
    }
}
