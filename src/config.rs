//! Application configuration.
//!
//! Sources are layered in this order, later ones winning:
//! built-in defaults, an optional TOML file, then environment variables
//! prefixed with `MOVIEDECK__` (sections separated by `__`, e.g.
//! `MOVIEDECK__TMDB__API_KEY`). A bare `TMDB_API_KEY` is used when no key
//! was configured any other way.

use crate::catalog::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE, DEFAULT_LANGUAGE, ProviderConfig};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "MOVIEDECK";
pub const DEFAULT_STORE_NAME: &str = "movie-store";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet interval before a typed query is sent
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted state; platform data dir when unset
    pub dir: Option<PathBuf>,
    pub store_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Directory for daily-rolling log files; stderr only when unset
    pub file: Option<PathBuf>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, reading `path` when given (it must exist)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        if config.tmdb.api_key.trim().is_empty()
            && let Ok(key) = std::env::var("TMDB_API_KEY")
        {
            config.tmdb.api_key = key;
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Effective configuration as TOML, with the API key masked
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let mut masked = self.clone();
        if !masked.tmdb.api_key.is_empty() {
            masked.tmdb.api_key = "********".to_string();
        }
        toml::to_string_pretty(&masked)
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(self.tmdb.api_key.clone())
            .with_base_url(self.tmdb.base_url.clone())
            .with_image_base_url(self.tmdb.image_base_url.clone())
            .with_language(self.tmdb.language.clone())
            .with_timeout(Duration::from_secs(self.tmdb.timeout_secs))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// Configured storage directory, else `<data dir>/moviedeck`
    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("moviedeck")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.storage.store_name, "movie-store");
        assert!(config.storage_dir().ends_with("moviedeck"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [tmdb]
            api_key = "abc"
            language = "de-DE"

            [search]
            debounce_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.tmdb.language, "de-DE");
        assert_eq!(config.tmdb.timeout_secs, 30);
        assert_eq!(config.search_debounce(), Duration::from_millis(250));

        let provider = config.provider_config();
        assert_eq!(provider.language, "de-DE");
        assert_eq!(provider.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[storage]\ndir = \"/tmp/moviedeck-test\"\nstore_name = \"alt-store\""
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/moviedeck-test"));
        assert_eq!(config.storage.store_name, "alt-store");
    }

    #[test]
    fn test_to_toml_masks_key() {
        let mut config = AppConfig::default();
        config.tmdb.api_key = "secret".to_string();

        let text = config.to_toml().unwrap();

        assert!(!text.contains("secret"));
        assert!(text.contains("********"));
    }
}
