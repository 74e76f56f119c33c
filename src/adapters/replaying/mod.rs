//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod document_store;
pub mod filesystem;
pub mod host;
pub mod object_store;
pub mod selector;
pub mod sleeper;

use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::CassetteError;
use crate::ports::PortError;

pub use clock::ReplayingClock;
pub use document_store::ReplayingDocumentStore;
pub use filesystem::ReplayingFileSystem;
pub use host::ReplayingHostResolver;
pub use object_store::ReplayingObjectStore;
pub use selector::ReplayingSelector;
pub use sleeper::SkippingSleeper;

/// Pull the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<Value, CassetteError> {
    let mut replayer = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(replayer.next_interaction(port, method)?.output.clone())
}

/// Decode a recorded `{"Ok": v}` / `{"Err": "msg"}` output.
pub(crate) fn replay_result<T: DeserializeOwned>(
    port: &str,
    method: &str,
    output: Value,
) -> Result<T, PortError> {
    let malformed = |message: String| CassetteError::Malformed {
        port: port.to_string(),
        method: method.to_string(),
        message,
    };
    match output {
        Value::Object(mut fields) => {
            if let Some(err) = fields.remove("Err") {
                let message = err.as_str().map_or_else(|| err.to_string(), str::to_string);
                return Err(message.into());
            }
            let ok = fields.remove("Ok").ok_or_else(|| malformed("expected Ok or Err".into()))?;
            serde_json::from_value(ok).map_err(|e| malformed(e.to_string()).into())
        }
        other => Err(malformed(format!("expected an object, got {other}")).into()),
    }
}

/// Replay a fallible port call, folding cassette failures into the port error.
pub(crate) fn replay<T: DeserializeOwned>(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<T, PortError> {
    let output = next_output(replayer, port, method)?;
    replay_result(port, method, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_values_deserialize() {
        let v: Vec<String> = replay_result("fs", "list_dir", json!({"Ok": ["v1", "v2"]})).unwrap();
        assert_eq!(v, vec!["v1", "v2"]);
    }

    #[test]
    fn err_values_become_port_errors() {
        let err = replay_result::<String>("host", "hostname", json!({"Err": "no network"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "no network");
    }

    #[test]
    fn bare_values_are_malformed() {
        let err = replay_result::<bool>("fs", "is_dir", json!(true)).unwrap_err();
        assert!(err.to_string().contains("malformed fs::is_dir"));
    }
}
