//! NeuronBridge library names.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{choose, sorted_unique, value_text, LIBRARY_NAME_FIELD};
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// Menu title for library selection.
pub const LIBRARY_TITLE: &str = "Select a NeuronBridge library:";

/// One library entry in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Library name as published.
    pub name: String,
    /// Any other per-library settings, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Library config keyed by an internal (e.g. color-depth MIP) library id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryConfig(pub BTreeMap<String, LibraryEntry>);

impl LibraryConfig {
    /// Loads a YAML or JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryConfig`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let failed = |message: String| Error::LibraryConfig { path: path.to_path_buf(), message };
        let content = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
        serde_yaml::from_str(&content).map_err(|e| failed(e.to_string()))
    }

    /// Library names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(|entry| entry.name.as_str())
    }
}

/// Where library names come from.
#[derive(Debug, Clone)]
pub enum LibrarySource {
    /// Second-level prefixes under `<template>/` in a bucket.
    ObjectStore {
        /// Bucket to list.
        bucket: String,
        /// Alignment template prefix.
        template: String,
    },
    /// Names from a library config.
    Config(LibraryConfig),
    /// Distinct `libraryName` values in a collection.
    DocumentStore {
        /// Collection to query.
        collection: String,
    },
}

/// Extracts `<library>` from an object store key `<template>/<library>/`.
fn library_from_key(key: &str) -> Option<String> {
    // At least one character before some `/`.
    if !key.chars().skip(1).any(|c| c == '/') {
        return None;
    }
    key.split('/').nth(1).filter(|name| !name.is_empty()).map(str::to_string)
}

/// Lists library names from `source`, sorted and de-duplicated.
///
/// For the object and document store sources, names containing `exclude`
/// are dropped; an empty `exclude` excludes nothing. Config entries are
/// curated already and are never excluded.
///
/// # Errors
///
/// Returns [`Error::Port`] if the object or document store fails.
pub async fn list_libraries(
    ctx: &ServiceContext,
    source: &LibrarySource,
    exclude: Option<&str>,
) -> Result<Vec<String>> {
    let exclude = exclude.filter(|e| !e.is_empty());
    let keep = |name: &String| !exclude.is_some_and(|e| name.contains(e));
    let names: Vec<String> = match source {
        LibrarySource::ObjectStore { bucket, template } => {
            let prefix = format!("{template}/");
            let keys =
                ctx.objects.list_prefixes(bucket, &prefix).await.map_err(Error::port("objects"))?;
            keys.iter().filter_map(|key| library_from_key(key)).filter(keep).collect()
        }
        LibrarySource::Config(config) => config.names().map(str::to_string).collect(),
        LibrarySource::DocumentStore { collection } => ctx
            .documents
            .distinct(collection, LIBRARY_NAME_FIELD, None)
            .map_err(Error::port("documents"))?
            .iter()
            .map(value_text)
            .filter(keep)
            .collect(),
    };
    Ok(sorted_unique(names))
}

/// Lists libraries and asks the user to pick one.
///
/// # Errors
///
/// Returns [`Error::Port`] if listing or the selector fails.
pub async fn select_library(
    ctx: &ServiceContext,
    source: &LibrarySource,
    exclude: Option<&str>,
) -> Result<Option<String>> {
    let libraries = list_libraries(ctx, source, exclude).await?;
    choose(ctx, LIBRARY_TITLE, libraries)
}
