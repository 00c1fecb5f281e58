use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Optional TOML configuration providing defaults for the shared and
/// print options. CLI flags that are explicitly present always win.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Navigation timeout, e.g. "30s" or "500ms".
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub wait_until: String,
    pub print: PrintConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout: Duration::from_secs(30),
            wait_until: "load".to_string(),
            print: PrintConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrintConfig {
    pub format: String,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        PrintConfig {
            format: "Letter".to_string(),
            margin_top: "6.25mm".to_string(),
            margin_right: "6.25mm".to_string(),
            margin_bottom: "14.11mm".to_string(),
            margin_left: "6.25mm".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default config location: `~/.config/pagecap/config.toml`.
pub fn central_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("pagecap")
            .join("config.toml"),
    )
}

impl Config {
    /// Loads configuration with the usual precedence: an explicit
    /// `--config` path must exist and parse; otherwise the central file
    /// is used when present; otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Config::from_file(path);
        }
        if let Some(path) = central_config_path() {
            if path.exists() {
                return Config::from_file(&path);
            }
        }
        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.wait_until.trim().is_empty() {
            return Err("wait_until must not be empty".to_string());
        }
        if self.print.format.trim().is_empty() {
            return Err("print.format must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.wait_until, "load");
        assert_eq!(config.print.format, "Letter");
        assert_eq!(config.print.margin_bottom, "14.11mm");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout = \"5s\"\n\n[print]\nformat = \"A4\"").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.print.format, "A4");
        // Unset keys keep their defaults.
        assert_eq!(config.wait_until, "load");
        assert_eq!(config.print.margin_top, "6.25mm");
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not_a_key = true").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = Config::load(Some(Path::new("/nonexistent/pagecap.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn validate_rejects_empty_wait_until() {
        let config = Config {
            wait_until: " ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
