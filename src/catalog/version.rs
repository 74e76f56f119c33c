//! NeuronBridge release, data and PPP versions.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::{json, Value};

use super::{choose, sorted_unique, value_text, LIBRARY_NAME_FIELD};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::Filter;

/// Default directory holding one `v<version>` directory per release.
pub const DEFAULT_RELEASE_BASE: &str = "/groups/scicompsoft/informatics/data/release_libraries";

/// Menu title for release versions.
pub const RELEASE_VERSION_TITLE: &str = "Select a NeuronBridge version:";
/// Menu title for data versions.
pub const DATA_VERSION_TITLE: &str = "Select a NeuronBridge data version:";
/// Menu title for PPP versions.
pub const PPP_VERSION_TITLE: &str = "Select a PPP version:";

/// `processedTags` keys whose arrays hold data versions.
const PROCESSED_TAG_KINDS: [&str; 2] = ["ColorDepthSearch", "PPPMatch"];

fn is_release_dir(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('v') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Lists `v<digit>...` entries under `base`, sorted.
///
/// Returns `None` when `base` is not a directory.
///
/// # Errors
///
/// Returns [`Error::Port`] if the directory cannot be listed.
pub fn release_versions(ctx: &ServiceContext, base: &Path) -> Result<Option<Vec<String>>> {
    if !ctx.fs.is_dir(base) {
        return Ok(None);
    }
    let entries = ctx.fs.list_dir(base).map_err(Error::port("fs"))?;
    Ok(Some(sorted_unique(entries.into_iter().filter(|name| is_release_dir(name)))))
}

/// Asks the user to pick a release version from `base`.
///
/// # Errors
///
/// Returns [`Error::MissingDirectory`] if `base` does not exist, or
/// [`Error::Port`] if listing or the selector fails.
pub fn select_release_version(ctx: &ServiceContext, base: &Path) -> Result<Option<String>> {
    let versions =
        release_versions(ctx, base)?.ok_or_else(|| Error::MissingDirectory(base.to_path_buf()))?;
    choose(ctx, RELEASE_VERSION_TITLE, versions)
}

/// Collects data versions from `processedTags` and numeric `tags`.
///
/// With `library`, only that library's documents are considered.
///
/// # Errors
///
/// Returns [`Error::Port`] if the document store fails.
pub fn data_versions(
    ctx: &ServiceContext,
    collection: &str,
    library: Option<&str>,
) -> Result<Vec<String>> {
    let filter = library.map(|library| {
        let mut filter = Filter::new();
        filter.insert(LIBRARY_NAME_FIELD.to_string(), json!(library));
        filter
    });

    let mut versions = BTreeSet::new();
    let processed = ctx
        .documents
        .distinct(collection, "processedTags", filter.as_ref())
        .map_err(Error::port("documents"))?;
    for row in &processed {
        for kind in PROCESSED_TAG_KINDS {
            if let Some(Value::Array(tags)) = row.get(kind) {
                versions.extend(tags.iter().map(value_text));
            }
        }
    }

    let tags = ctx
        .documents
        .distinct(collection, "tags", filter.as_ref())
        .map_err(Error::port("documents"))?;
    versions.extend(
        tags.iter().map(value_text).filter(|tag| tag.starts_with(|c: char| c.is_ascii_digit())),
    );

    Ok(versions.into_iter().collect())
}

/// Asks the user to pick a data version.
///
/// # Errors
///
/// Returns [`Error::Port`] if the store or the selector fails.
pub fn select_data_version(
    ctx: &ServiceContext,
    collection: &str,
    library: Option<&str>,
) -> Result<Option<String>> {
    let versions = data_versions(ctx, collection, library)?;
    choose(ctx, DATA_VERSION_TITLE, versions)
}

/// Lists every distinct `tags` value in a PPP collection, sorted.
///
/// # Errors
///
/// Returns [`Error::Port`] if the document store fails.
pub fn ppp_versions(ctx: &ServiceContext, collection: &str) -> Result<Vec<String>> {
    let tags =
        ctx.documents.distinct(collection, "tags", None).map_err(Error::port("documents"))?;
    Ok(sorted_unique(tags.iter().map(value_text)))
}

/// Asks the user to pick a PPP version.
///
/// # Errors
///
/// Returns [`Error::Port`] if the store or the selector fails.
pub fn select_ppp_version(ctx: &ServiceContext, collection: &str) -> Result<Option<String>> {
    let versions = ppp_versions(ctx, collection)?;
    choose(ctx, PPP_VERSION_TITLE, versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;

    #[test]
    fn release_dirs_start_with_v_and_digit() {
        assert!(is_release_dir("v3.0.0"));
        assert!(is_release_dir("v2"));
        assert!(!is_release_dir("vX"));
        assert!(!is_release_dir("v"));
        assert!(!is_release_dir("3.0.0"));
    }

    #[test]
    fn release_versions_filter_directory_entries() {
        let ctx = ServiceContext::replaying_cassette(
            &Cassette::new("releases")
                .with_interaction("fs", "is_dir", json!(true))
                .with_interaction(
                    "fs",
                    "list_dir",
                    json!({"Ok": ["v3.0.0", "README", "v2.4.1", "vtest"]}),
                ),
        );
        let versions = release_versions(&ctx, Path::new("/releases")).unwrap();
        assert_eq!(versions, Some(vec!["v2.4.1".to_string(), "v3.0.0".to_string()]));
    }

    #[test]
    fn missing_release_base_is_an_error_when_selecting() {
        let ctx = ServiceContext::replaying_cassette(
            &Cassette::new("missing").with_interaction("fs", "is_dir", json!(false)),
        );
        let err = select_release_version(&ctx, Path::new("/nowhere")).unwrap_err();
        assert!(matches!(err, Error::MissingDirectory(path) if path == Path::new("/nowhere")));
    }

    #[test]
    fn data_versions_merge_processed_tags_and_numeric_tags() {
        let ctx = ServiceContext::replaying_cassette(
            &Cassette::new("data")
                .with_interaction(
                    "documents",
                    "distinct",
                    json!({"Ok": [
                        {"ColorDepthSearch": ["3.0.0", "2.4.1"], "PPPMatch": ["2.4.0"]},
                        {"ColorDepthSearch": ["3.0.0"], "Other": ["9.9.9"]},
                    ]}),
                )
                .with_interaction(
                    "documents",
                    "distinct",
                    json!({"Ok": ["3.1.0", "published", "2.4.1", "qa"]}),
                ),
        );
        let versions = data_versions(&ctx, "neuronMetadata", Some("flyem_hemibrain_1_2_1"));
        assert_eq!(versions.unwrap(), vec!["2.4.0", "2.4.1", "3.0.0", "3.1.0"]);
    }

    #[test]
    fn ppp_versions_keep_every_tag() {
        let ctx = ServiceContext::replaying_cassette(
            &Cassette::new("ppp").with_interaction(
                "documents",
                "distinct",
                json!({"Ok": ["v2.0", "v1.0", "v2.0", "unreleased"]}),
            ),
        );
        let versions = ppp_versions(&ctx, "pppMatches").unwrap();
        assert_eq!(versions, vec!["unreleased", "v1.0", "v2.0"]);
    }

    #[test]
    fn selecting_a_ppp_version() {
        let ctx = ServiceContext::replaying_cassette(
            &Cassette::new("ppp-select")
                .with_interaction("documents", "distinct", json!({"Ok": ["v2.0", "v1.0"]}))
                .with_interaction("selector", "select", json!({"Ok": 0})),
        );
        assert_eq!(select_ppp_version(&ctx, "pppMatches").unwrap().as_deref(), Some("v1.0"));
    }
}
