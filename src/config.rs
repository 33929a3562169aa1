use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::EtlError;
use crate::store::FsDocumentStore;

pub const DEFAULT_CONFIG_FILE: &str = "swapi-etl.json";
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub database: Utf8PathBuf,
    pub timeout: Duration,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads `path`, or `swapi-etl.json` in the current directory when present. An
    /// explicit path must exist; a missing default file means built-in defaults.
    pub fn resolve(
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, EtlError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config = if path.is_none() && !config_path.exists() {
            Config::default()
        } else {
            let content = fs::read_to_string(&config_path)
                .map_err(|_| EtlError::ConfigRead(config_path.clone()))?;
            serde_json::from_str(&content).map_err(|err| EtlError::ConfigParse(err.to_string()))?
        };

        Self::resolve_config(config, overrides)
    }

    pub fn resolve_config(
        config: Config,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, EtlError> {
        let base_url = overrides
            .base_url
            .or(config.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let database = match overrides.database.or(config.database) {
            Some(path) => Utf8PathBuf::from(path),
            None => FsDocumentStore::default_root()?,
        };
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(ResolvedConfig {
            base_url,
            database,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_file_values() {
        let config = Config {
            base_url: Some("http://localhost:8000/api".to_string()),
            database: Some("/var/lib/swapi".to_string()),
            timeout_secs: Some(5),
        };
        let overrides = ConfigOverrides {
            base_url: None,
            database: Some("/tmp/swapi".to_string()),
        };

        let resolved = ConfigLoader::resolve_config(config, overrides).unwrap();
        assert_eq!(resolved.base_url, "http://localhost:8000/api");
        assert_eq!(resolved.database, Utf8PathBuf::from("/tmp/swapi"));
        assert_eq!(resolved.timeout, Duration::from_secs(5));
    }
}
