//! # dir-sizes
//!
//! A fast CLI tool that shows how much space each subdirectory of a directory
//! takes up.
//!
//! Every immediate subdirectory of the root is measured recursively on its own
//! worker thread. Results are printed as soon as each directory is done, or
//! collected and printed sorted by size with `--sort`.
//!
//! ## Features
//!
//! - Parallel measurement, one top-level directory per worker
//! - Streaming or size-sorted output
//! - Per-directory failure isolation (`N/A` instead of aborting)
//! - Ctrl-C stops dispatching new directories and exits cleanly
//! - Persistent configuration via `~/.config/dir-sizes/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Measure the subdirectories of the current directory as they finish
//! dir-sizes
//!
//! # Largest directories first
//! dir-sizes --dir ~/Projects --sort --order desc
//! ```

mod cli;

use std::{io, path::Path, process::exit};

use anyhow::{Context, Ok, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use dir_sizes::{
    CancellationFlag, OutputOptions, ResultSet, ScanError, ScanSummary, Scanner,
    config::FileConfig,
    output::JsonOutput,
    presenter::{LinePrinter, print_results},
};

/// Exit status used when the user interrupted the scan.
const EXIT_CANCELLED: i32 = 130;

/// Entry point for the dir-sizes application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and
/// printing any errors to stderr before exiting with a non-zero status code.
/// A user-requested cancellation is reported as a notice, not an error.
fn main() {
    if let Err(err) = inner_main() {
        if let Some(ScanError::Cancelled { completed }) = err.downcast_ref::<ScanError>() {
            eprintln!(
                "{}",
                format!("⚠️  Scan cancelled after {completed} directories; remaining entries skipped")
                    .yellow()
            );
            exit(EXIT_CANCELLED);
        }

        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function orchestrates the full pipeline: parse arguments, install the
/// Ctrl-C handler, scan the root, and print results in streaming or buffered
/// form.
///
/// # Errors
///
/// Returns errors from signal-handler installation, an invalid root, worker
/// pool creation, cancellation, writing to stdout, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    let dir = args.directory(&file_config);
    let scan_options = args.scan_options(&file_config);
    let output_options = args.output_options(&file_config);

    let cancel = CancellationFlag::new();
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || handler_flag.cancel()).context("Failed to set signal handler")?;

    let scanner = Scanner::new(scan_options)
        .with_cancellation(cancel)
        .with_progress(output_options.sort && !json_mode);

    if output_options.buffered() {
        run_buffered(&scanner, &dir, &output_options)
    } else {
        run_streaming(&scanner, &dir, &output_options)
    }
}

/// Print each directory as soon as it has been measured.
fn run_streaming(scanner: &Scanner, dir: &Path, opts: &OutputOptions) -> Result<()> {
    let printer = LinePrinter::new(io::stdout(), opts.name_width);
    let summary = scanner.scan(dir, &printer)?;

    print_finished(&summary);
    Ok(())
}

/// Collect every directory, then print them sorted or as JSON.
fn run_buffered(scanner: &Scanner, dir: &Path, opts: &OutputOptions) -> Result<()> {
    let results = ResultSet::new();
    let summary = scanner.scan(dir, &results)?;

    let results = if opts.sort {
        results.into_sorted(opts.order)
    } else {
        results.into_results()
    };

    if opts.json {
        let output = JsonOutput::from_results(dir, &results, &summary, opts.sort);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_results(&mut io::stdout().lock(), &results, opts.name_width)?;
    print_finished(&summary);
    Ok(())
}

/// Print the closing elapsed-time line.
fn print_finished(summary: &ScanSummary) {
    println!(
        "{}",
        format!(
            "---------- Finished {} directories in {} ms ----------",
            summary.scanned,
            summary.elapsed.as_millis()
        )
        .dimmed()
    );
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dir-sizes configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default directory to scan (defaults to current directory when not set)
# dir = "."

[scanning]
# Number of threads used to measure directories (0 = all CPU cores)
# threads = 0

# Explain why directories are reported as N/A
# verbose = false

[output]
# Wait for every directory, then print them sorted by size
# sort = false

# Sort direction: "asc" (smallest first) or "desc" (largest first)
# order = "asc"

# Width the directory-name column is padded to
# name_width = 50
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let dir_str = config.dir.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let order_str = config.output.order.as_deref().map_or_else(
        || "\"asc\"  (default)".to_string(),
        |v| format!("\"{v}\""),
    );

    format!(
        "\
dir        = {dir}

[scanning]
threads    = {threads}
verbose    = {verbose}

[output]
sort       = {sort}
order      = {order}
name_width = {name_width}",
        dir = dir_str,
        threads = show_usize(config.scanning.threads, "0 (all cores)"),
        verbose = show_bool(config.scanning.verbose, false),
        sort = show_bool(config.output.sort, false),
        order = order_str,
        name_width = show_usize(
            config.output.name_width,
            &dir_sizes::config::DEFAULT_NAME_WIDTH.to_string()
        ),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        std::result::Result::Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.dir.is_none());
        assert!(config.scanning.threads.is_none());
        assert!(config.output.sort.is_none());
    }

    #[test]
    fn test_format_config_marks_defaults() {
        let text = format_config(&FileConfig::default());

        assert!(text.contains("threads    = 0 (all cores)  (default)"));
        assert!(text.contains("order      = \"asc\"  (default)"));
        assert!(text.contains("name_width = 50  (default)"));
    }
}
