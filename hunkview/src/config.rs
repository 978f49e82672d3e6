//! User configuration.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/hunkview/config.toml` (falling back
//! to `~/.config/hunkview/config.toml`). Every key is optional:
//!
//! ```toml
//! theme = "catppuccin-mocha"
//! visibility_level = 3
//! recent_commits = 20
//! ```
//!
//! Command-line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Settings read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in theme name, resolved by `Theme::from_name`.
    pub theme: String,
    /// Starting visibility level; out-of-range values are clamped by the core.
    pub visibility_level: Option<i64>,
    /// How many commits the "Recent commits" section lists.
    pub recent_commits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            visibility_level: None,
            recent_commits: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Returns the path to the hunkview config file.
///
/// Prefers `$XDG_CONFIG_HOME/hunkview/config.toml`; falls back to
/// `~/.config/hunkview/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("hunkview").join("config.toml")
}

/// Loads the config at `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, and
/// [`ConfigError::Parse`] if it is not valid TOML for [`Config`].
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => return Err(ConfigError::Io { path: path.to_owned(), source }),
    };
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
}

/// Like [`load_config`], but a broken file is logged and replaced by defaults so
/// a typo never prevents startup.
pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(config) => {
            info!("config: {config:?}");
            config
        }
        Err(e) => {
            warn!("{e}; using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write(&dir, "visibility_level = 3\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.visibility_level, Some(3));
        assert_eq!(config.recent_commits, 10);
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn full_file_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write(&dir, "theme = \"dark\"\nvisibility_level = 9\nrecent_commits = 3\n");
        assert_eq!(
            load_config(&path).unwrap(),
            Config { theme: "dark".to_owned(), visibility_level: Some(9), recent_commits: 3 }
        );
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write(&dir, "recent_commits = \"many\"\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(load_or_default(&path), Config::default());
    }
}
