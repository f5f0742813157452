use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const PLAY_STORE_URL: &str = "https://play.google.com/store/apps/details?id=";
pub const APP_STORE_URL: &str = "https://amp-api.apps.apple.com/v1/catalog/RU/apps/";

/// Default overall fetch timeout. Deliberately tight; real-world callers
/// usually want to raise it with [`Settings::with_timeout`].
pub const DEFAULT_TIMEOUT_MS: u64 = 100;

/// Caller configuration, fixed for the lifetime of a [`Resolver`](crate::app::Resolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overall timeout for one fetch, redirects included, in milliseconds (default: 100)
    pub timeout_ms: u64,

    /// Bearer token for the App Store catalog API
    pub app_store_token: Option<String>,

    /// Play Store detail page prefix; the bundle id is appended
    pub play_store_url: String,

    /// App Store catalog API prefix; the numeric id is appended
    pub app_store_url: String,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            app_store_token: None,
            play_store_url: PLAY_STORE_URL.to_string(),
            app_store_url: APP_STORE_URL.to_string(),
            user_agent: None,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Token sent to the App Store; empty when none is configured.
    pub fn app_store_token(&self) -> &str {
        self.app_store_token.as_deref().unwrap_or("")
    }

    /// Sub-millisecond remainders round up, so a non-zero timeout never
    /// becomes zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn with_app_store_token(mut self, token: impl Into<String>) -> Self {
        self.app_store_token = Some(token.into());
        self
    }

    pub fn with_play_store_url(mut self, url: impl Into<String>) -> Self {
        self.play_store_url = url.into();
        self
    }

    pub fn with_app_store_url(mut self, url: impl Into<String>) -> Self {
        self.app_store_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Load settings from `~/.config/appmeta/config.toml`, or defaults if
    /// the file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load settings from a TOML file. Omitted keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("appmeta").join("config.toml"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.timeout(), Duration::from_millis(100));
        assert_eq!(settings.app_store_token(), "");
        assert_eq!(settings.play_store_url, PLAY_STORE_URL);
        assert_eq!(settings.app_store_url, APP_STORE_URL);
    }

    #[test]
    fn test_overrides_compose_onto_defaults() {
        let settings = Settings::default()
            .with_timeout(Duration::from_secs(2))
            .with_app_store_token("secret");

        assert_eq!(settings.timeout_ms, 2000);
        assert_eq!(settings.app_store_token(), "secret");
        // Untouched
        assert_eq!(settings.play_store_url, PLAY_STORE_URL);
        assert_eq!(Settings::default().timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_sub_millisecond_timeout_rounds_up() {
        let settings = Settings::default().with_timeout(Duration::from_micros(500));
        assert_eq!(settings.timeout(), Duration::from_millis(1));

        let settings = Settings::default().with_timeout(Duration::from_micros(1500));
        assert_eq!(settings.timeout_ms, 2);

        let settings = Settings::default().with_timeout(Duration::ZERO);
        assert_eq!(settings.timeout_ms, 0);
    }

    #[test]
    fn test_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = 1500\napp_store_token = \"abc\"").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.timeout(), Duration::from_millis(1500));
        assert_eq!(settings.app_store_token(), "abc");
        assert_eq!(settings.app_store_url, APP_STORE_URL);
    }

    #[test]
    fn test_empty_config_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = \"soon\"").unwrap();

        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
