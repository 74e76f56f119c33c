//! Selection subcommands.

use std::path::Path;

use super::{block_on, report_choice};
use crate::catalog::{self, LibraryConfig, LibrarySource};
use crate::cli::LibrarySourceKind;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// Arguments of the `library` subcommand.
#[derive(Debug)]
pub struct LibraryRequest<'a> {
    /// Where names come from.
    pub kind: LibrarySourceKind,
    /// Alignment template for the aws source.
    pub template: Option<&'a str>,
    /// Config file for the config source.
    pub config: Option<&'a Path>,
    /// Collection for the mongo source.
    pub collection: &'a str,
    /// Exclusion substring.
    pub exclude: Option<&'a str>,
}

/// Selects a library and prints it.
///
/// For the aws source without `--template`, the template is chosen first.
///
/// # Errors
///
/// Returns an error if a required argument is missing, the config cannot be
/// loaded, or a store or the selector fails.
pub fn library(ctx: &ServiceContext, settings: &Settings, request: &LibraryRequest<'_>) -> Result<()> {
    block_on(select_and_print_library(ctx, settings, request))?
}

async fn select_and_print_library(
    ctx: &ServiceContext,
    settings: &Settings,
    request: &LibraryRequest<'_>,
) -> Result<()> {
    let source = match request.kind {
        LibrarySourceKind::Aws => {
            let template = match request.template {
                Some(template) => template.to_string(),
                None => match catalog::select_template(ctx, &settings.bucket).await? {
                    Some(template) => template,
                    None => {
                        eprintln!("No alignment template selected");
                        return Ok(());
                    }
                },
            };
            LibrarySource::ObjectStore { bucket: settings.bucket.clone(), template }
        }
        LibrarySourceKind::Config => {
            let path = request.config.ok_or(Error::MissingArgument {
                argument: "--config",
                operation: "library --source config",
            })?;
            LibrarySource::Config(LibraryConfig::load(path)?)
        }
        LibrarySourceKind::Mongo => {
            LibrarySource::DocumentStore { collection: request.collection.to_string() }
        }
    };
    let chosen = catalog::select_library(ctx, &source, request.exclude).await?;
    report_choice(chosen, "No NeuronBridge library selected");
    Ok(())
}

/// Selects a release directory version and prints it.
///
/// # Errors
///
/// Returns an error if the release base is missing or cannot be listed.
pub fn release_version(ctx: &ServiceContext, settings: &Settings) -> Result<()> {
    let chosen = catalog::select_release_version(ctx, &settings.release_base)?;
    report_choice(chosen, "No NeuronBridge version selected");
    Ok(())
}

/// Selects a data version and prints it.
///
/// # Errors
///
/// Returns an error if the document store or the selector fails.
pub fn data_version(ctx: &ServiceContext, collection: &str, library: Option<&str>) -> Result<()> {
    let chosen = catalog::select_data_version(ctx, collection, library)?;
    report_choice(chosen, "No NeuronBridge data version selected");
    Ok(())
}

/// Selects a PPP version and prints it.
///
/// # Errors
///
/// Returns an error if the document store or the selector fails.
pub fn ppp_version(ctx: &ServiceContext, collection: &str) -> Result<()> {
    let chosen = catalog::select_ppp_version(ctx, collection)?;
    report_choice(chosen, "No PPP version selected");
    Ok(())
}

/// Selects an alignment template and prints it.
///
/// # Errors
///
/// Returns an error if the listing or the selector fails.
pub fn template(ctx: &ServiceContext, settings: &Settings) -> Result<()> {
    let chosen = block_on(catalog::select_template(ctx, &settings.bucket))??;
    report_choice(chosen, "No alignment template selected");
    Ok(())
}
