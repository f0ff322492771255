use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::AppError;

const DEFAULT_SEARCH_LIMIT: u32 = 20;
const MAX_SEARCH_LIMIT: u32 = 50;
const DEFAULT_DEBOUNCE_MS: u64 = 400;
const DEFAULT_PLAYLIST_NAME: &str = "New Playlist";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Zero disables search-as-you-type.
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_playlist_name")]
    pub default_playlist_name: String,
    /// Style class name to colour, e.g. `"section-title": "#1db954"`.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_playlist_name() -> String {
    DEFAULT_PLAYLIST_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_playlist_name: default_playlist_name(),
            styles: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Load .env file if present (won't override existing env vars)
        let _ = dotenvy::dotenv();

        let config_path = Self::config_file_path()?;
        let env_client_id = std::env::var("SPOTIFY_CLIENT_ID").ok();
        Self::resolve(env_client_id.as_deref(), &config_path)
    }

    /// Environment client id wins over the file; everything else comes from
    /// the file when it exists.
    fn resolve(env_client_id: Option<&str>, config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            Self::load_from(config_path)?
        } else {
            Self::default()
        };

        if let Some(client_id) = env_client_id.map(str::trim).filter(|id| !id.is_empty()) {
            config.client_id = client_id.to_string();
        }

        if config.client_id.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Spotify Client ID not found.\n\
                 Set SPOTIFY_CLIENT_ID environment variable or create config at {}",
                config_path.display()
            ))
            .into());
        }

        config.search_limit = config.search_limit.clamp(1, MAX_SEARCH_LIMIT);
        if config.default_playlist_name.trim().is_empty() {
            config.default_playlist_name = default_playlist_name();
        }
        Ok(config)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig =
            serde_json::from_str(&contents).with_context(|| "Failed to parse config file")?;
        Ok(config)
    }

    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("tracklist");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn env_client_id_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = AppConfig::resolve(Some("  abc123  "), &path).unwrap();
        assert_eq!(config.client_id, "abc123");
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.search_debounce_ms, 400);
        assert_eq!(config.default_playlist_name, "New Playlist");
    }

    #[test]
    fn file_values_are_read_and_env_overrides_client_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{"client_id":"from-file","search_limit":10,"search_debounce_ms":0}"#,
        );

        let config = AppConfig::resolve(None, &path).unwrap();
        assert_eq!(config.client_id, "from-file");
        assert!(config.styles.is_empty());
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.search_debounce_ms, 0);

        let config = AppConfig::resolve(Some("from-env"), &path).unwrap();
        assert_eq!(config.client_id, "from-env");
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn style_overrides_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r##"{"client_id":"x","styles":{"section-title":"#1db954"}}"##,
        );
        let config = AppConfig::resolve(None, &path).unwrap();
        assert_eq!(config.styles["section-title"], "#1db954");
    }

    #[test]
    fn search_limit_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"client_id":"x","search_limit":500}"#);
        assert_eq!(AppConfig::resolve(None, &path).unwrap().search_limit, 50);

        let path = write_config(&dir, r#"{"client_id":"x","search_limit":0}"#);
        assert_eq!(AppConfig::resolve(None, &path).unwrap().search_limit, 1);
    }

    #[test]
    fn missing_client_id_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let err = AppConfig::resolve(Some("   "), &path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::Config(_))
        ));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "{ not json");
        let err = AppConfig::resolve(Some("x"), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
