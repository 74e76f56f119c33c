//! NeuronBridge release helpers.
//!
//! The core is [`uid`], a generator of time-ordered 64-bit IDs. Around it sit
//! the interactive pickers in [`catalog`] and status records in [`status`],
//! all reaching the outside world through the traits in [`ports`].

pub mod adapters;
pub mod cassette;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod status;
pub mod uid;

pub use error::{Error, Result};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
/// Help and version requests come back as [`Error::Usage`] too; callers print
/// them as-is.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(Error::Usage)?;
    logging::init_tracing(cli.settings.log_level.as_deref());
    commands::dispatch(&cli.command, &cli.settings)
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::Error;

    #[test]
    fn run_decodes_without_touching_ports() {
        let result = run(["neuronbridge", "decode", "419430917"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["neuronbridge", "unknown"]);
        assert!(matches!(result, Err(Error::Usage(_))));
    }

    #[test]
    fn run_rejects_wide_context() {
        let result = run(["neuronbridge", "uid", "--context", "16"]);
        assert!(matches!(result, Err(Error::Uid(_))));
    }
}
