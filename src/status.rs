//! Library status records.
//!
//! A status record notes that a library was (re)loaded somewhere: which
//! manifold, by what method, from what source, and how many images and
//! samples it holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ServiceContext;

/// Default manifold.
pub const DEFAULT_MANIFOLD: &str = "prod";
/// Default update method.
pub const DEFAULT_METHOD: &str = "MongoDB";
/// Source assumed when the method is [`DEFAULT_METHOD`].
pub const DEFAULT_MONGO_SOURCE: &str = "neuronMetadata";
/// Collection status records go into unless told otherwise.
pub const DEFAULT_STATUS_COLLECTION: &str = "libraryStatus";

/// Reasons a status update is rejected before reaching the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    /// No library was named.
    #[error("a library is required for a status update")]
    MissingLibrary,
    /// The method has no implied source and none was given.
    #[error("a source is required for status updates using method {method}")]
    MissingSource {
        /// Method in effect.
        method: String,
    },
}

/// Fallback values applied by [`StatusUpdate::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDefaults {
    /// Manifold when none is given.
    pub manifold: String,
    /// Method when none is given.
    pub method: String,
    /// Source implied by the default method.
    pub mongo_source: String,
}

impl Default for StatusDefaults {
    fn default() -> Self {
        Self {
            manifold: DEFAULT_MANIFOLD.into(),
            method: DEFAULT_METHOD.into(),
            mongo_source: DEFAULT_MONGO_SOURCE.into(),
        }
    }
}

/// A status update as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Library name.
    pub library: Option<String>,
    /// Manifold (`prod`, `dev`).
    pub manifold: Option<String>,
    /// Update method.
    pub method: Option<String>,
    /// Data source.
    pub source: Option<String>,
    /// Image count.
    pub images: Option<u64>,
    /// Sample count.
    pub samples: Option<u64>,
    /// Data set.
    pub dataset: Option<String>,
    /// neuPrint version.
    pub neuprint: Option<String>,
    /// NeuronBridge version.
    pub neuronbridge: Option<String>,
    /// Release.
    pub release: Option<String>,
    /// Tag.
    pub tag: Option<String>,
    /// When the update happened.
    pub update_date: Option<DateTime<Utc>>,
    /// Who made the update.
    pub updated_by: Option<String>,
}

/// A status record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStatus {
    /// Library name.
    pub library: String,
    /// Manifold.
    pub manifold: String,
    /// Update method.
    pub method: String,
    /// Data source.
    pub source: String,
    /// Image count.
    pub images: u64,
    /// Sample count.
    pub samples: u64,
    /// Data set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// neuPrint version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neuprint: Option<String>,
    /// NeuronBridge version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neuronbridge: Option<String>,
    /// Release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    /// Tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// When the update happened.
    pub update_date: DateTime<Utc>,
    /// Who made the update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl StatusUpdate {
    /// Fills in defaults and checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::MissingLibrary`] without a library, and
    /// [`StatusError::MissingSource`] when the method is not the default
    /// method and no source is given.
    pub fn resolve(
        self,
        defaults: &StatusDefaults,
        now: DateTime<Utc>,
    ) -> Result<LibraryStatus, StatusError> {
        let library = non_empty(self.library).ok_or(StatusError::MissingLibrary)?;
        let manifold = non_empty(self.manifold).unwrap_or_else(|| defaults.manifold.clone());
        let method = non_empty(self.method).unwrap_or_else(|| defaults.method.clone());
        // An explicit source wins even under the default method.
        let source = match non_empty(self.source) {
            Some(source) => source,
            None if method == defaults.method => defaults.mongo_source.clone(),
            None => return Err(StatusError::MissingSource { method }),
        };
        Ok(LibraryStatus {
            library,
            manifold,
            method,
            source,
            images: self.images.unwrap_or(0),
            samples: self.samples.unwrap_or(0),
            dataset: non_empty(self.dataset),
            neuprint: non_empty(self.neuprint),
            neuronbridge: non_empty(self.neuronbridge),
            release: non_empty(self.release),
            tag: non_empty(self.tag),
            update_date: self.update_date.unwrap_or(now),
            updated_by: self.updated_by,
        })
    }
}

/// Inserts a status record into `collection`.
///
/// Returns `Ok(false)` when the store rejects the insert or reports no
/// inserted id.
///
/// # Errors
///
/// Returns a [`StatusError`] if the update is incomplete.
pub fn update_library_status(
    ctx: &ServiceContext,
    collection: &str,
    update: StatusUpdate,
    defaults: &StatusDefaults,
) -> Result<bool, StatusError> {
    let status = update.resolve(defaults, ctx.clock.now())?;
    let document = match serde_json::to_value(&status) {
        Ok(document) => document,
        Err(err) => {
            tracing::error!(error = %err, "could not encode status record");
            return Ok(false);
        }
    };
    match ctx.documents.insert_one(collection, &document) {
        Ok(Some(id)) => {
            tracing::info!(%id, library = %status.library, collection, "status recorded");
            Ok(true)
        }
        Ok(None) => {
            tracing::error!(library = %status.library, "store returned no inserted id");
            Ok(false)
        }
        Err(err) => {
            tracing::error!(error = %err, library = %status.library, "could not insert status record");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn update(library: &str) -> StatusUpdate {
        StatusUpdate { library: Some(library.into()), ..StatusUpdate::default() }
    }

    #[test]
    fn defaults_fill_a_minimal_update() {
        let status = update("flyem_hemibrain_1_2_1").resolve(&StatusDefaults::default(), now());
        let status = status.unwrap();
        assert_eq!(status.manifold, "prod");
        assert_eq!(status.method, "MongoDB");
        assert_eq!(status.source, "neuronMetadata");
        assert_eq!((status.images, status.samples), (0, 0));
        assert_eq!(status.update_date, now());
    }

    #[test]
    fn library_is_required() {
        let err = StatusUpdate::default().resolve(&StatusDefaults::default(), now());
        assert_eq!(err.unwrap_err(), StatusError::MissingLibrary);
    }

    #[test]
    fn other_methods_need_a_source() {
        let mut request = update("flylight_gen1_mcfo");
        request.method = Some("S3".into());
        let err = request.clone().resolve(&StatusDefaults::default(), now()).unwrap_err();
        assert_eq!(err, StatusError::MissingSource { method: "S3".into() });

        request.source = Some("janelia-flylight-color-depth".into());
        let status = request.resolve(&StatusDefaults::default(), now()).unwrap();
        assert_eq!(status.source, "janelia-flylight-color-depth");
    }

    // Older loaders replaced any source with the Mongo source whenever the
    // method was left out; an explicit source now always wins.
    #[test]
    fn explicit_source_overrides_mongo_source_under_default_method() {
        let mut request = update("flylight_gen1_mcfo");
        request.source = Some("publishedImage".into());
        let status = request.resolve(&StatusDefaults::default(), now()).unwrap();
        assert_eq!(status.method, "MongoDB");
        assert_eq!(status.source, "publishedImage");
    }

    #[test]
    fn document_is_camel_case_without_empty_fields() {
        let mut request = update("flyem_hemibrain_1_2_1");
        request.images = Some(44_593);
        request.release = Some(String::new());
        request.tag = Some("v3.0.0".into());
        request.updated_by = Some("svirskasr".into());
        let status = request.resolve(&StatusDefaults::default(), now()).unwrap();

        let document = serde_json::to_value(&status).unwrap();
        assert_eq!(document["images"], json!(44_593));
        assert_eq!(document["tag"], json!("v3.0.0"));
        assert_eq!(document["updatedBy"], json!("svirskasr"));
        assert_eq!(document["updateDate"], json!("2024-03-01T12:00:00Z"));
        assert!(document.get("release").is_none());
        assert!(document.get("dataset").is_none());
    }

    #[test]
    fn insert_reports_success_and_failure() {
        let cassette = Cassette::new("status")
            .with_interaction("clock", "now", json!("2024-03-01T12:00:00Z"))
            .with_interaction("documents", "insert_one", json!({"Ok": "65e1c0de"}))
            .with_interaction("clock", "now", json!("2024-03-01T12:00:01Z"))
            .with_interaction("documents", "insert_one", json!({"Err": "duplicate key"}))
            .with_interaction("clock", "now", json!("2024-03-01T12:00:02Z"))
            .with_interaction("documents", "insert_one", json!({"Ok": null}));
        let ctx = ServiceContext::replaying_cassette(&cassette);
        let defaults = StatusDefaults::default();

        for expected in [true, false, false] {
            let inserted =
                update_library_status(&ctx, "libraryStatus", update("lib"), &defaults).unwrap();
            assert_eq!(inserted, expected);
        }
    }

    #[test]
    fn incomplete_update_never_reaches_the_store() {
        let ctx = ServiceContext::replaying_cassette(
            &Cassette::new("rejected").with_interaction("clock", "now", json!("2024-03-01T12:00:00Z")),
        );
        let result = update_library_status(
            &ctx,
            "libraryStatus",
            StatusUpdate::default(),
            &StatusDefaults::default(),
        );
        assert_eq!(result, Err(StatusError::MissingLibrary));
    }
}
