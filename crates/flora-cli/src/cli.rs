//! CLI argument definitions for the plant record harvester.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use flora_fetch::TaxonLevel;
use flora_output::ExistingFile;

#[derive(Parser)]
#[command(
    name = "flora",
    version,
    about = "Harvest plant distribution, collection, and Red List records",
    long_about = "Harvest plant records into CSV files.\n\n\
                  Walks the Euro+Med PlantBase classification, decodes Euro+Med\n\
                  distributions, looks up BGCI ex situ collections, and fetches\n\
                  IUCN Red List assessments."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Walk the Euro+Med classification and write every leaf taxon.
    Taxonomy(TaxonomyArgs),

    /// Fetch and decode Euro+Med distributions for listed taxa.
    Distribution(DistributionArgs),

    /// Look up listed taxa in BGCI PlantSearch.
    Collections(CollectionsArgs),

    /// Fetch IUCN Red List assessments for taxa held in collections.
    Redlist(RedlistArgs),

    /// Decode one condensed distribution string and print the result.
    Decode(DecodeArgs),

    /// List the regions of a region catalog.
    Regions(RegionsArgs),
}

/// Options shared by the fetch subcommands.
#[derive(Args)]
pub struct FetchArgs {
    /// Overwrite an existing output file.
    #[arg(long = "force")]
    pub force: bool,

    /// Append to an existing output file.
    #[arg(long = "extend", conflicts_with = "force")]
    pub extend: bool,

    /// TOML file with endpoint, timeout, and token settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl FetchArgs {
    pub fn existing_file(&self) -> ExistingFile {
        ExistingFile::from_flags(self.force, self.extend)
    }
}

#[derive(Args)]
pub struct TaxonomyArgs {
    /// Output CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Start below this Euro+Med taxon instead of the plant root.
    #[arg(long = "root", value_name = "UUID")]
    pub root: Option<String>,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Args)]
pub struct DistributionArgs {
    /// CSV file with a `euro_med_id` column.
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Output CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Region catalog (JSON object of code to region name).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: PathBuf,

    /// With --extend, fetch taxa again even if the output already has them.
    #[arg(long = "no-skip-existing")]
    pub no_skip_existing: bool,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Args)]
pub struct CollectionsArgs {
    /// Taxonomy CSV written by `flora taxonomy`.
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Output CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Which taxa to look up.
    #[arg(long = "level", value_enum, default_value = "species")]
    pub level: LevelArg,

    /// Keep only BGCI rows without an infraspecific epithet for species lookups.
    #[arg(long = "exact-subspecies")]
    pub exact_subspecies: bool,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Args)]
pub struct RedlistArgs {
    /// Taxonomy CSV written by `flora taxonomy`.
    #[arg(long = "taxa", value_name = "PATH")]
    pub taxa: PathBuf,

    /// Collections CSV written by `flora collections`.
    #[arg(long = "collections", value_name = "PATH")]
    pub collections: PathBuf,

    /// Output CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Region catalog (JSON object of code to region name).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: PathBuf,

    /// Only list regions where the taxon occurs.
    #[arg(long = "present")]
    pub present: bool,

    /// Condensed distribution string, e.g. "<b>Gr Tu</b> [cIt]".
    #[arg(value_name = "FRAGMENT")]
    pub fragment: String,
}

#[derive(Args)]
pub struct RegionsArgs {
    /// Region catalog (JSON object of code to region name).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: PathBuf,
}

/// Taxon levels for BGCI lookups.
#[derive(Clone, Copy, ValueEnum)]
pub enum LevelArg {
    Species,
    Subspecies,
}

impl From<LevelArg> for TaxonLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Species => Self::Species,
            LevelArg::Subspecies => Self::Subspecies,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_flags() {
        let cli = Cli::try_parse_from([
            "flora",
            "distribution",
            "--input",
            "taxa.csv",
            "--output",
            "dist.csv",
            "--catalog",
            "regions.json",
            "--extend",
        ])
        .unwrap();
        let Command::Distribution(args) = cli.command else {
            panic!("expected distribution command");
        };
        assert_eq!(args.fetch.existing_file(), ExistingFile::Append);
        assert!(!args.no_skip_existing);
    }

    #[test]
    fn test_force_conflicts_with_extend() {
        let result = Cli::try_parse_from([
            "flora", "taxonomy", "-o", "taxa.csv", "--force", "--extend",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_collections_level() {
        let cli = Cli::try_parse_from([
            "flora",
            "collections",
            "-i",
            "taxa.csv",
            "-o",
            "bgci.csv",
            "--level",
            "subspecies",
            "--exact-subspecies",
        ])
        .unwrap();
        let Command::Collections(args) = cli.command else {
            panic!("expected collections command");
        };
        assert_eq!(TaxonLevel::from(args.level), TaxonLevel::Subspecies);
        assert!(args.exact_subspecies);
        assert_eq!(args.fetch.existing_file(), ExistingFile::Fail);
    }

    #[test]
    fn test_decode_takes_fragment() {
        let cli = Cli::try_parse_from([
            "flora",
            "decode",
            "--catalog",
            "regions.json",
            "<b>Gr</b> [cIt]",
        ])
        .unwrap();
        let Command::Decode(args) = cli.command else {
            panic!("expected decode command");
        };
        assert_eq!(args.fragment, "<b>Gr</b> [cIt]");
    }
}
