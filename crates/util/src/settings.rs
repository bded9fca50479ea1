//! HTTP settings for outbound tooling downloads.
//!
//! A tiny JSON-backed store in the standard configuration directory
//! (`~/.config/sqltools/settings.json` on most platforms) carrying the proxy
//! URL and strict-SSL flag that get merged into download configurations.
//! When the file names no proxy, the conventional `HTTPS_PROXY`/`HTTP_PROXY`
//! environment variables are honored instead.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "SQLTOOLS_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Error surfaced when reading or writing settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Proxy and TLS behavior for outbound HTTP performed by this toolset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    /// Proxy URL applied to all download traffic, when set.
    #[serde(default)]
    pub proxy: Option<String>,
    /// Whether TLS certificates must validate. Defaults to true.
    #[serde(rename = "strictSSL", default = "default_strict_ssl")]
    pub strict_ssl: bool,
}

fn default_strict_ssl() -> bool {
    true
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            strict_ssl: true,
        }
    }
}

impl HttpSettings {
    /// Load settings from the default path, falling back to environment proxy
    /// variables when the file carries no proxy.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&default_settings_path())
    }

    /// Load settings from an explicit path. A missing file yields defaults; a
    /// malformed file is tolerated with a warning so a stray edit cannot brick
    /// the tool.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let mut settings = match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(settings) => settings,
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse settings file; using defaults"
                    );
                    Self::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(error) => return Err(SettingsError::Io(error)),
        };
        if settings.proxy.is_none() {
            settings.proxy = proxy_from_env();
        }
        Ok(settings)
    }

    /// The proxy as a validated URL; invalid values are dropped with a warning.
    pub fn proxy_url(&self) -> Option<Url> {
        let raw = self.proxy.as_deref()?;
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(error) => {
                warn!(proxy = raw, error = %error, "Ignoring invalid proxy URL");
                None
            }
        }
    }
}

fn proxy_from_env() -> Option<String> {
    for key in ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"] {
        if let Ok(value) = env::var(key) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sqltools")
        .join(SETTINGS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PROXY_ENV: [(&str, Option<&str>); 4] = [
        ("HTTPS_PROXY", None),
        ("https_proxy", None),
        ("HTTP_PROXY", None),
        ("http_proxy", None),
    ];

    #[test]
    fn missing_file_yields_defaults() {
        temp_env::with_vars(NO_PROXY_ENV, || {
            let dir = tempfile::tempdir().expect("tempdir");
            let settings = HttpSettings::load_from(&dir.path().join("absent.json")).expect("load");
            assert_eq!(settings, HttpSettings::default());
            assert!(settings.strict_ssl);
        });
    }

    #[test]
    fn file_values_round_trip() {
        temp_env::with_vars(NO_PROXY_ENV, || {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join(SETTINGS_FILE_NAME);
            fs::write(&path, r#"{"proxy": "http://proxy.corp:8080", "strictSSL": false}"#)
                .expect("write settings");
            let settings = HttpSettings::load_from(&path).expect("load");
            assert_eq!(settings.proxy.as_deref(), Some("http://proxy.corp:8080"));
            assert!(!settings.strict_ssl);
        });
    }

    #[test]
    fn strict_ssl_defaults_to_true_when_absent() {
        temp_env::with_vars(NO_PROXY_ENV, || {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join(SETTINGS_FILE_NAME);
            fs::write(&path, r#"{"proxy": null}"#).expect("write settings");
            let settings = HttpSettings::load_from(&path).expect("load");
            assert!(settings.strict_ssl);
        });
    }

    #[test]
    fn malformed_file_is_tolerated() {
        temp_env::with_vars(NO_PROXY_ENV, || {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join(SETTINGS_FILE_NAME);
            fs::write(&path, "{ not json").expect("write settings");
            let settings = HttpSettings::load_from(&path).expect("load");
            assert_eq!(settings, HttpSettings::default());
        });
    }

    #[test]
    fn env_proxy_fills_missing_file_value() {
        temp_env::with_vars(
            [
                ("HTTPS_PROXY", Some("http://env-proxy:3128")),
                ("https_proxy", None),
                ("HTTP_PROXY", None),
                ("http_proxy", None),
            ],
            || {
                let dir = tempfile::tempdir().expect("tempdir");
                let settings =
                    HttpSettings::load_from(&dir.path().join("absent.json")).expect("load");
                assert_eq!(settings.proxy.as_deref(), Some("http://env-proxy:3128"));
            },
        );
    }

    #[test]
    fn invalid_proxy_url_is_dropped() {
        let settings = HttpSettings {
            proxy: Some("not a url".into()),
            strict_ssl: true,
        };
        assert!(settings.proxy_url().is_none());

        let settings = HttpSettings {
            proxy: Some("http://proxy.corp:8080".into()),
            strict_ssl: true,
        };
        assert_eq!(settings.proxy_url().expect("valid url").port(), Some(8080));
    }
}
