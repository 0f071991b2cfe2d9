//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/dir-sizes/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! dir = "~/Projects"
//!
//! [scanning]
//! threads = 4
//! verbose = true
//!
//! [output]
//! sort = true
//! order = "desc"
//! name_width = 40
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default root directory to scan
    pub dir: Option<PathBuf>,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileScanConfig {
    /// Number of worker threads
    pub threads: Option<usize>,

    /// Whether to report why directories could not be measured
    pub verbose: Option<bool>,
}

/// Output options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileOutputConfig {
    /// Whether to buffer and sort results by size
    pub sort: Option<bool>,

    /// Sort direction (`"asc"` or `"desc"`)
    pub order: Option<String>,

    /// Padding width of the name column
    pub name_width: Option<usize>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/dir-sizes/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dir-sizes").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// contains invalid TOML.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.dir.is_none());
        assert!(config.scanning.threads.is_none());
        assert!(config.scanning.verbose.is_none());
        assert!(config.output.sort.is_none());
        assert!(config.output.order.is_none());
        assert!(config.output.name_width.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
dir = "~/Projects"

[scanning]
threads = 4
verbose = true

[output]
sort = true
order = "desc"
name_width = 40
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.dir, Some(PathBuf::from("~/Projects")));
        assert_eq!(config.scanning.threads, Some(4));
        assert_eq!(config.scanning.verbose, Some(true));
        assert_eq!(config.output.sort, Some(true));
        assert_eq!(config.output.order, Some("desc".to_string()));
        assert_eq!(config.output.name_width, Some(40));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r"
[output]
sort = true
";

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert!(config.dir.is_none());
        assert_eq!(config.output.sort, Some(true));
        assert!(config.output.order.is_none());
        assert!(config.scanning.threads.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.dir.is_none());
        assert!(config.output.sort.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[scanning]
threads = "many"
"#;
        let result = toml::from_str::<FileConfig>(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = FileConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();

        assert!(config.dir.is_none());
    }

    #[test]
    fn test_load_from_reports_parse_errors_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[output\nsort = true").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_from_reads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "dir = \"/data\"\n[scanning]\nthreads = 2\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("/data")));
        assert_eq!(config.scanning.threads, Some(2));
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with("dir-sizes/config.toml"));
        }
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let path = PathBuf::from("~/Projects");
        let expanded = expand_tilde(&path);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Projects"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(expand_tilde(&path), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_expand_tilde_bare() {
        let path = PathBuf::from("~");
        let expanded = expand_tilde(&path);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home);
        }
    }
}
