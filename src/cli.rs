//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their defaults
//! using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use dir_sizes::config::file::{FileConfig, expand_tilde};
use dir_sizes::config::{DEFAULT_NAME_WIDTH, OutputOptions, ScanOptions, SortOrder};

/// Command-line arguments controlling how results are presented.
#[derive(Parser)]
struct OutputArgs {
    /// Wait for every directory, then print them sorted by size
    ///
    /// Without this flag each directory is printed as soon as it has been
    /// measured, in no particular order.
    #[arg(short = 's', long)]
    sort: bool,

    /// Sort direction used with --sort
    ///
    /// Directories that could not be measured (N/A) are always listed last.
    #[arg(long, value_enum)]
    order: Option<SortOrder>,

    /// Width the directory-name column is padded to
    #[arg(short = 'w', long)]
    name_width: Option<usize>,
}

/// Command-line arguments controlling directory scanning.
#[derive(Parser)]
struct ScanningArgs {
    /// The number of threads used to measure directories
    ///
    /// A value of 0 uses one thread per available CPU core.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Explain why directories are reported as N/A
    ///
    /// Access errors are collected during the scan and printed to stderr
    /// once it is over.
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser)]
#[command(name = "dir-sizes")]
#[command(about = "Show the total size of every subdirectory of a directory")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// The directory whose subdirectories are measured
    ///
    /// Defaults to the current directory.
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// Results are buffered until the scan is over; they are sorted only
    /// when --sort is also given.
    #[arg(long)]
    json: bool,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve the root directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        if let Some(ref dir) = self.dir {
            return dir.clone();
        }

        config
            .dir
            .as_ref()
            .map_or_else(|| PathBuf::from("."), |dir| expand_tilde(dir))
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **threads**: CLI > config > `0` (all cores)
    /// - **verbose**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
        }
    }

    /// Extract output options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > hardcoded default. An `order`
    /// in the config file that is neither `asc` nor `desc` is ignored.
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        OutputOptions {
            sort: self.output.sort || config.output.sort.unwrap_or(false),
            order: self
                .output
                .order
                .or_else(|| {
                    config
                        .output
                        .order
                        .as_ref()
                        .and_then(|s| SortOrder::from_str(s, true).ok())
                })
                .unwrap_or_default(),
            name_width: self
                .output
                .name_width
                .or(config.output.name_width)
                .unwrap_or(DEFAULT_NAME_WIDTH),
            json: self.json,
        }
    }
}
