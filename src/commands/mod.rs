//! Command dispatch and handlers.

pub mod catalog;
pub mod status;
pub mod uid;

use std::env;
use std::future::Future;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// Replays a cassette file instead of touching live systems.
pub const REPLAY_ENV: &str = "NB_REPLAY";
/// Records every port interaction into a cassette under this directory.
pub const RECORD_ENV: &str = "NB_RECORD";

/// Dispatch a parsed command to its handler.
///
/// `NB_REPLAY=<file>` serves every port from a cassette; otherwise
/// `NB_RECORD=<dir>` wraps the live adapters in recorders and writes the
/// cassette once the command finishes, even if it failed.
///
/// # Errors
///
/// Returns an error if the cassette cannot be loaded or written, or if the
/// selected command handler fails.
pub fn dispatch(command: &Command, settings: &Settings) -> Result<()> {
    if let Some(path) = env::var_os(REPLAY_ENV) {
        tracing::info!(cassette = ?path, "replaying session");
        let ctx = ServiceContext::replaying(&PathBuf::from(path))?;
        return dispatch_with_context(command, settings, &ctx);
    }

    let endpoints = settings.endpoints();
    let Some(dir) = env::var_os(RECORD_ENV) else {
        return dispatch_with_context(command, settings, &ServiceContext::live(&endpoints));
    };

    let session = RecordingSession::new(&PathBuf::from(dir));
    let ctx = ServiceContext::recording(&endpoints, &session);
    let result = dispatch_with_context(command, settings, &ctx);

    // Recorders hold the session's shared handle until the context goes.
    drop(ctx);
    let path = session.finish()?;
    eprintln!("Recording saved to: {}", path.display());

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    settings: &Settings,
    ctx: &ServiceContext,
) -> Result<()> {
    match command {
        Command::Uid { context, last, count } => uid::generate(ctx, *context, *last, *count),
        Command::Decode { uid } => {
            uid::decode(*uid);
            Ok(())
        }
        Command::HostByte => {
            uid::host_byte(ctx);
            Ok(())
        }
        Command::Library { source, template, config, collection, exclude } => {
            let request = catalog::LibraryRequest {
                kind: *source,
                template: template.as_deref(),
                config: config.as_deref(),
                collection,
                exclude: exclude.as_deref(),
            };
            catalog::library(ctx, settings, &request)
        }
        Command::Version { from_release_dir, library, collection } => {
            if *from_release_dir {
                catalog::release_version(ctx, settings)
            } else {
                catalog::data_version(ctx, collection, library.as_deref())
            }
        }
        Command::PppVersion { collection } => catalog::ppp_version(ctx, collection),
        Command::Template => catalog::template(ctx, settings),
        Command::Status(args) => status::run(ctx, settings, args),
    }
}

/// Runs a future to completion on a single-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;
    Ok(runtime.block_on(future))
}

/// Prints a chosen value, or the reason nothing was chosen.
fn report_choice(choice: Option<String>, nothing: &str) {
    match choice {
        Some(value) => println!("{value}"),
        None => eprintln!("{nothing}"),
    }
}
