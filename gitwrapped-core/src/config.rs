//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/gitwrapped/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/gitwrapped/` (~/.config/gitwrapped/)
//! - State/Logs: `$XDG_STATE_HOME/gitwrapped/` (~/.local/state/gitwrapped/)

use crate::analytics::{DEFAULT_GLYPH, DEFAULT_MAX_UNITS_PER_DAY};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// GitHub API access
    #[serde(default)]
    pub github: GitHubConfig,

    /// Density graph rendering
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GitHubConfig {
    /// API base URL (REST and GraphQL share it)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Personal access token (can also use GITHUB_TOKEN)
    pub token: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    /// Token from config, falling back to the `GITHUB_TOKEN` env var.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Density graph configuration
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RenderConfig {
    /// Glyph ceiling per day; the rest shows as "+N more"
    #[serde(default = "default_max_units_per_day")]
    pub max_units_per_day: u32,

    /// Glyph for one contribution
    #[serde(default = "default_glyph")]
    pub glyph: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_units_per_day: default_max_units_per_day(),
            glyph: default_glyph(),
        }
    }
}

fn default_max_units_per_day() -> u32 {
    DEFAULT_MAX_UNITS_PER_DAY
}

fn default_glyph() -> char {
    DEFAULT_GLYPH
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.github.api_url.trim().is_empty() {
            return Err(Error::Config("github.api_url must not be empty".to_string()));
        }
        if self.github.timeout_secs == 0 {
            return Err(Error::Config(
                "github.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.render.max_units_per_day == 0 {
            return Err(Error::Config(
                "render.max_units_per_day must be at least 1".to_string(),
            ));
        }
        crate::logging::parse_filter(&self.logging.level)?;
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/gitwrapped/config.toml` (~/.config/gitwrapped/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("gitwrapped").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/gitwrapped/` (~/.local/state/gitwrapped/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("gitwrapped")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.render.max_units_per_day, 50);
        assert_eq!(config.render.glyph, '▓');
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r##"
[github]
api_url = "https://github.example.com/api/v3"
token = "ghp_test"

[render]
max_units_per_day = 20
glyph = "#"

[logging]
level = "debug"
"##;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.github.api_url, "https://github.example.com/api/v3");
        assert_eq!(config.github.resolve_token().as_deref(), Some("ghp_test"));
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.render.max_units_per_day, 20);
        assert_eq!(config.render.glyph, '#');
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let config = Config {
            logging: LoggingConfig {
                level: "gitwrapped_core=loud".to_string(),
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validation_rejects_zero_cap() {
        let config = Config {
            render: RenderConfig {
                max_units_per_day: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[render]\nmax_units_per_day = 0").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("max_units_per_day"));

        std::fs::write(&path, "[github]\ntimeout_secs = 5\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.github.timeout_secs, 5);
    }

    #[test]
    fn test_state_dir() {
        assert!(Config::state_dir().ends_with("gitwrapped"));
    }
}
