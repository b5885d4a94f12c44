//! Plant record harvester CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use flora_cli::logging::{LogConfig, LogFormat, init_logging};
use flora_cli::summary::print_run_summary;
use flora_fetch::RunSummary;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_collections, run_decode, run_distribution, run_redlist, run_regions, run_taxonomy,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Taxonomy(args) => {
            fetch_exit_code("Euro+Med taxonomy", &args.output, run_taxonomy(args))
        }
        Command::Distribution(args) => {
            fetch_exit_code("Euro+Med distributions", &args.output, run_distribution(args))
        }
        Command::Collections(args) => {
            fetch_exit_code("BGCI collections", &args.output, run_collections(args))
        }
        Command::Redlist(args) => {
            fetch_exit_code("IUCN Red List", &args.output, run_redlist(args))
        }
        Command::Decode(args) => exit_code(run_decode(args)),
        Command::Regions(args) => exit_code(run_regions(args)),
    };
    std::process::exit(exit_code);
}

/// Print the summary of a fetch run; any failed taxon makes the exit code 1.
fn fetch_exit_code(
    title: &str,
    output: &std::path::Path,
    result: anyhow::Result<RunSummary>,
) -> i32 {
    match result {
        Ok(summary) => {
            print_run_summary(title, output, &summary);
            i32::from(summary.has_failures())
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn exit_code(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
