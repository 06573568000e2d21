use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const URL_ENV: &str = "STORX_SATELLITE_URL";
pub const TOKEN_ENV: &str = "STORX_TOKEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_color() -> String {
    "auto".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Session token, sent as the satellite session cookie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "https://us1.storx.io".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SatelliteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub satellite: SatelliteConfig,
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("storx-billing").join("config.toml")
    }

    /// Load config from the default path with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Like `load`, but an unreadable config file falls back to defaults.
    /// Environment overrides apply either way.
    pub fn load_or_default() -> Self {
        Self::or_default_with_env(Self::load_file(), |key| std::env::var(key).ok())
    }

    fn or_default_with_env(
        loaded: Result<Self, ConfigError>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut config = loaded.unwrap_or_else(|e| {
            log::warn!("{}; using defaults", e);
            Self::default()
        });
        config.apply_env(lookup);
        config
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load_file() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(URL_ENV).filter(|v| !v.is_empty()) {
            self.satellite.url = url;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.satellite.token = Some(token);
        }
    }

    /// Serialize and write this config to the config file path.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !["text", "json"].contains(&self.settings.default_format.as_str()) {
            issues.push(format!(
                "Invalid default_format: '{}' (must be 'text' or 'json')",
                self.settings.default_format
            ));
        }
        if !["auto", "always", "never"].contains(&self.settings.color.as_str()) {
            issues.push(format!(
                "Invalid color: '{}' (must be 'auto', 'always', or 'never')",
                self.settings.color
            ));
        }
        if let Err(issue) = validate_satellite_url(&self.satellite.url) {
            issues.push(issue);
        }
        if self.satellite.timeout_secs == 0 {
            issues.push("Satellite timeout_secs must be greater than zero".to_string());
        }
        issues
    }
}

/// The session token is sent with every request, so the satellite must be
/// reached over HTTPS. Plain HTTP is only accepted for loopback hosts.
pub fn validate_satellite_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("Invalid satellite url '{}': {}", raw, e))?;
    match url.scheme() {
        "https" => Ok(()),
        "http" if is_loopback(url.host_str()) => Ok(()),
        other => Err(format!(
            "Satellite url must use HTTPS, got: {} ({})",
            raw, other
        )),
    }
}

fn is_loopback(host: Option<&str>) -> bool {
    matches!(host, Some("localhost") | Some("127.0.0.1") | Some("[::1]"))
}
