//! Runtime settings shared by every subcommand.
//!
//! Each setting can come from a flag or an `NB_*` environment variable;
//! `main` loads a `.env` file first so either works from there too.

use std::path::PathBuf;

use clap::Args;

use crate::adapters::live::object_store::DEFAULT_S3_ENDPOINT;
use crate::catalog::version::DEFAULT_RELEASE_BASE;
use crate::context::Endpoints;
use crate::status::{StatusDefaults, DEFAULT_MANIFOLD, DEFAULT_METHOD, DEFAULT_MONGO_SOURCE};

/// Bucket holding the color depth MIPs.
pub const DEFAULT_BUCKET: &str = "janelia-flylight-color-depth";
/// Directory of the JSON-lines document store.
pub const DEFAULT_STORE_DIR: &str = "nbstore";

/// Global settings.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// S3 bucket to list templates and libraries from.
    #[arg(long, global = true, env = "NB_BUCKET", default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Base URL of the S3-compatible endpoint.
    #[arg(long, global = true, env = "NB_S3_ENDPOINT", default_value = DEFAULT_S3_ENDPOINT)]
    pub s3_endpoint: String,

    /// Directory holding document store collections.
    #[arg(long, global = true, env = "NB_STORE_DIR", default_value = DEFAULT_STORE_DIR)]
    pub store_dir: PathBuf,

    /// Directory holding one `v<version>` directory per release.
    #[arg(long, global = true, env = "NB_RELEASE_BASE", default_value = DEFAULT_RELEASE_BASE)]
    pub release_base: PathBuf,

    /// Log filter, e.g. `info` or `neuronbridge=debug`. Falls back to `RUST_LOG`.
    #[arg(long, global = true, env = "NB_LOG")]
    pub log_level: Option<String>,

    /// Manifold recorded when a status update names none.
    #[arg(long, global = true, env = "NB_MANIFOLD", default_value = DEFAULT_MANIFOLD)]
    pub default_manifold: String,

    /// Method recorded when a status update names none.
    #[arg(long, global = true, env = "NB_METHOD", default_value = DEFAULT_METHOD)]
    pub default_method: String,

    /// Source implied by the default method.
    #[arg(long, global = true, env = "NB_MONGO_SOURCE", default_value = DEFAULT_MONGO_SOURCE)]
    pub mongo_source: String,
}

impl Settings {
    /// Where the live adapters point.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints { s3_endpoint: self.s3_endpoint.clone(), store_dir: self.store_dir.clone() }
    }

    /// Fallbacks for status updates.
    #[must_use]
    pub fn status_defaults(&self) -> StatusDefaults {
        StatusDefaults {
            manifold: self.default_manifold.clone(),
            method: self.default_method.clone(),
            mongo_source: self.mongo_source.clone(),
        }
    }
}
