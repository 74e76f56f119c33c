//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod document_store;
pub mod filesystem;
pub mod host;
pub mod object_store;
pub mod selector;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;

pub use clock::RecordingClock;
pub use document_store::RecordingDocumentStore;
pub use filesystem::RecordingFileSystem;
pub use host::RecordingHostResolver;
pub use object_store::RecordingObjectStore;
pub use selector::RecordingSelector;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| json!({ "unserializable": e.to_string() }))
}

/// Record an interaction with a simple (non-Result) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize + ?Sized,
    O: Serialize + ?Sized,
{
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, to_json(input), to_json(output));
}

/// Record a `Result<T, E>` interaction.
///
/// `Ok(v)` is stored as `{"Ok": v}` and `Err(e)` as `{"Err": e.to_string()}`,
/// the shape `replaying::replay_result` reads back.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize + ?Sized,
{
    let output = match result {
        Ok(v) => json!({ "Ok": to_json(v) }),
        Err(e) => json!({ "Err": e.to_string() }),
    };
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, to_json(input), output);
}
