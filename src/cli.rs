//! CLI argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Settings;
use crate::status::{StatusUpdate, DEFAULT_STATUS_COLLECTION};
use crate::uid::Uid;

/// Collection holding neuron metadata.
pub const DEFAULT_METADATA_COLLECTION: &str = "neuronMetadata";
/// Collection holding PPP matches.
pub const DEFAULT_PPP_COLLECTION: &str = "pppMatches";

/// Top-level CLI parser for `neuronbridge`.
#[derive(Debug, Parser)]
#[command(name = "neuronbridge", version, about = "NeuronBridge release helpers")]
pub struct Cli {
    /// Settings shared by every subcommand.
    #[command(flatten)]
    pub settings: Settings,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Where `library` looks for names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LibrarySourceKind {
    /// Prefixes under an alignment template in the bucket.
    Aws,
    /// A library config file.
    Config,
    /// Distinct library names in the document store.
    Mongo,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate UIDs.
    Uid {
        /// Deployment context, 0 to 15.
        #[arg(long, default_value_t = 2)]
        context: u64,
        /// Previously issued UID to avoid.
        #[arg(long)]
        last: Option<Uid>,
        /// How many UIDs to issue, each avoiding the one before.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
    },
    /// Split a UID into its fields.
    Decode {
        /// The UID to decode.
        uid: Uid,
    },
    /// Print this host's byte.
    HostByte,
    /// Select a NeuronBridge library.
    Library {
        /// Where library names come from.
        #[arg(long, value_enum, default_value_t = LibrarySourceKind::Aws)]
        source: LibrarySourceKind,
        /// Alignment template (aws source); chosen interactively when omitted.
        #[arg(long)]
        template: Option<String>,
        /// Library config file (config source).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Collection to query (mongo source).
        #[arg(long, default_value = DEFAULT_METADATA_COLLECTION)]
        collection: String,
        /// Drop libraries whose name contains this text.
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Select a NeuronBridge version.
    Version {
        /// Pick from release directories instead of the document store.
        #[arg(long)]
        from_release_dir: bool,
        /// Only consider this library's data versions.
        #[arg(long)]
        library: Option<String>,
        /// Collection to query.
        #[arg(long, default_value = DEFAULT_METADATA_COLLECTION)]
        collection: String,
    },
    /// Select a PPP version.
    PppVersion {
        /// Collection to query.
        #[arg(long, default_value = DEFAULT_PPP_COLLECTION)]
        collection: String,
    },
    /// Select an alignment template.
    Template,
    /// Record a library status update.
    Status(StatusArgs),
}

/// Arguments of the `status` subcommand.
#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Library name.
    #[arg(long)]
    library: Option<String>,
    /// Manifold (prod, dev).
    #[arg(long)]
    manifold: Option<String>,
    /// Update method.
    #[arg(long)]
    method: Option<String>,
    /// Data source.
    #[arg(long)]
    source: Option<String>,
    /// Image count.
    #[arg(long)]
    images: Option<u64>,
    /// Sample count.
    #[arg(long)]
    samples: Option<u64>,
    /// Data set.
    #[arg(long)]
    dataset: Option<String>,
    /// neuPrint version.
    #[arg(long)]
    neuprint: Option<String>,
    /// NeuronBridge version.
    #[arg(long)]
    neuronbridge: Option<String>,
    /// Release.
    #[arg(long)]
    release: Option<String>,
    /// Tag.
    #[arg(long)]
    tag: Option<String>,
    /// Update time (RFC 3339); defaults to now.
    #[arg(long)]
    update_date: Option<DateTime<Utc>>,
    /// Who made the update.
    #[arg(long)]
    updated_by: Option<String>,
    /// Collection to insert into.
    #[arg(long, default_value = DEFAULT_STATUS_COLLECTION)]
    pub collection: String,
}

impl StatusArgs {
    /// The update these arguments describe.
    #[must_use]
    pub fn update(&self) -> StatusUpdate {
        StatusUpdate {
            library: self.library.clone(),
            manifold: self.manifold.clone(),
            method: self.method.clone(),
            source: self.source.clone(),
            images: self.images,
            samples: self.samples,
            dataset: self.dataset.clone(),
            neuprint: self.neuprint.clone(),
            neuronbridge: self.neuronbridge.clone(),
            release: self.release.clone(),
            tag: self.tag.clone(),
            update_date: self.update_date,
            updated_by: self.updated_by.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, LibrarySourceKind};
    use clap::Parser;

    #[test]
    fn parses_uid_subcommand() {
        let cli = Cli::parse_from(["neuronbridge", "uid", "--last", "419430917", "--count", "3"]);
        match cli.command {
            Command::Uid { context, last, count } => {
                assert_eq!(context, 2);
                assert_eq!(last.map(u64::from), Some(419_430_917));
                assert_eq!(count, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_count() {
        assert!(Cli::try_parse_from(["neuronbridge", "uid", "--count", "0"]).is_err());
    }

    #[test]
    fn parses_library_with_global_settings() {
        let cli = Cli::parse_from([
            "neuronbridge",
            "library",
            "--source",
            "mongo",
            "--exclude",
            "published",
            "--store-dir",
            "/data/nb",
        ]);
        assert_eq!(cli.settings.store_dir.to_str(), Some("/data/nb"));
        assert!(matches!(
            cli.command,
            Command::Library { source: LibrarySourceKind::Mongo, exclude: Some(ref e), .. } if e == "published"
        ));
    }

    #[test]
    fn parses_status_fields() {
        let cli = Cli::parse_from([
            "neuronbridge",
            "status",
            "--library",
            "flyem_hemibrain_1_2_1",
            "--images",
            "44593",
            "--update-date",
            "2024-03-01T12:00:00Z",
        ]);
        let Command::Status(args) = cli.command else {
            panic!("expected status command");
        };
        let update = args.update();
        assert_eq!(update.library.as_deref(), Some("flyem_hemibrain_1_2_1"));
        assert_eq!(update.images, Some(44_593));
        assert!(update.update_date.is_some());
        assert_eq!(update.method, None);
        assert_eq!(args.collection, "libraryStatus");
    }

    #[test]
    fn decode_needs_a_number() {
        assert!(Cli::try_parse_from(["neuronbridge", "decode", "abc"]).is_err());
    }
}
