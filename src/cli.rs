// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stressfan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stressfan",
    version,
    about = "Run cassandra-stress in multiple concurrent processes and aggregate the results.",
    long_about = None
)]
pub struct CliArgs {
    /// Address of the database node to stress.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Number of concurrent stress runs.
    #[arg(value_name = "CONCURRENCY", value_parser = clap::value_parser!(u32).range(1..))]
    pub concurrency: u32,

    /// How long each run lasts, in seconds, minutes or hours (e.g. `30s`,
    /// `5m`, `1h`), one per run.
    ///
    /// Missing values are filled with `[campaign].default_duration` (10s
    /// unless configured); extra values are ignored.
    #[arg(value_name = "DURATION")]
    pub durations: Vec<String>,

    /// Path to a config file (TOML).
    ///
    /// Default: `Stressfan.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STRESSFAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved run plan and commands, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
