//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::nav::Theme;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sample: SampleConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_upload() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Sample time series configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SampleConfig {
    #[serde(default = "default_year")]
    pub year: i32,

    /// Fixed RNG seed. Unset means fresh entropy per session.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_year() -> i32 {
    2024
}

fn default_cache_capacity() -> usize {
    64
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            seed: None,
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Page chrome configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    #[serde(default)]
    pub default_theme: Theme,

    #[serde(default = "default_repository_url")]
    pub repository_url: String,
}

fn default_title() -> String {
    "Dashkit Boilerplate Application".to_string()
}

fn default_subtitle() -> String {
    "A starting template for your dashboard projects".to_string()
}

fn default_repository_url() -> String {
    "https://github.com/dashkit/dashkit".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            default_theme: Theme::default(),
            repository_url: default_repository_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("dashkit").join("config.toml")),
            Some(PathBuf::from("/etc/dashkit/config.toml")),
            Some(PathBuf::from("./dashkit.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> (Self, LoadReport) {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first of `paths` that exists and parses, else defaults plus
    /// environment. Nothing is logged here; the caller logs the report once
    /// tracing is set up.
    pub fn load_first(paths: &[PathBuf]) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    report.source = Some(path.clone());
                    return (config, report);
                }
                Err(e) => report.skipped.push(e),
            }
        }

        (Self::from_env(), report)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("DASHKIT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("DASHKIT_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Sample data overrides
        if let Ok(seed) = std::env::var("DASHKIT_SAMPLE_SEED") {
            if let Ok(s) = seed.parse() {
                self.sample.seed = Some(s);
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("DASHKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DASHKIT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Where a config came from, and files passed over on the way
#[derive(Debug, Default)]
pub struct LoadReport {
    /// File the config was read from; `None` means built-in defaults
    pub source: Option<PathBuf>,
    pub skipped: Vec<ConfigError>,
}

impl LoadReport {
    /// Report for a config read from an explicit path
    pub fn from_file(path: &Path) -> Self {
        Self {
            source: Some(path.to_path_buf()),
            skipped: Vec::new(),
        }
    }

    /// Log the outcome. Call after the subscriber is installed.
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("Skipped config: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Dashkit Configuration
#
# Environment variables override these settings:
# - DASHKIT_HOST
# - DASHKIT_PORT
# - DASHKIT_SAMPLE_SEED
# - DASHKIT_LOG_LEVEL
# - DASHKIT_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8501

# Allowed CORS origins for the JSON API
cors_origins = []

# Largest accepted upload (bytes)
max_upload_bytes = 10485760

[sample]
# Calendar year covered by the sample time series
year = 2024

# Fixed RNG seed; leave unset for different values per session
# seed = 42

# Maximum cached sample tables before the oldest is evicted
cache_capacity = 64

[ui]
title = "Dashkit Boilerplate Application"
subtitle = "A starting template for your dashboard projects"

# Theme used when the request does not pick one: light or dark
default_theme = "light"

# Footer link
repository_url = "https://github.com/dashkit/dashkit"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_file_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.sample.year, 2024);
        assert_eq!(config.sample.seed, None);
        assert_eq!(config.ui.default_theme, Theme::Light);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sample]\nseed = 7\n\n[ui]\ndefault_theme = \"dark\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sample.seed, Some(7));
        assert_eq!(config.sample.cache_capacity, 64);
        assert_eq!(config.ui.default_theme, Theme::Dark);
        assert_eq!(config.server.addr(), "0.0.0.0:8501");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/dashkit.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_first_skips_broken_files() {
        let mut broken = NamedTempFile::new().unwrap();
        writeln!(broken, "[server\nport = ").unwrap();
        let mut good = NamedTempFile::new().unwrap();
        writeln!(good, "[sample]\nyear = 2021").unwrap();

        let paths = vec![
            PathBuf::from("/nonexistent/dashkit.toml"),
            broken.path().to_path_buf(),
            good.path().to_path_buf(),
        ];
        let (config, report) = Config::load_first(&paths);

        assert_eq!(config.sample.year, 2021);
        assert_eq!(report.source.as_deref(), Some(good.path()));
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0], ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let (config, report) = Config::load_first(&[PathBuf::from("/nonexistent/dashkit.toml")]);
        assert_eq!(config.sample.year, 2024);
        assert!(report.source.is_none());
        assert!(report.skipped.is_empty());
    }
}
