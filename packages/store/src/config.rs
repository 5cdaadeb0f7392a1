//! # Client configuration — `wellness.toml`
//!
//! Defines the TOML document the web client is built with. The file tells the
//! client where the REST backend lives and how to title the application shell.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:9000/api"   # every request path is appended to this
//!
//! [app]
//! title = "HealthCare System"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config. Provides builder helpers (`new`, `with_title`), TOML (de)serialisation, and the canonical filename. |
//! | [`ApiConfig`] | Backend section — the `base_url` all endpoints are resolved against. |
//! | [`AppConfig`] | Presentation section — the navbar brand `title`. |
//!
//! Every field has a default, so a missing or empty file is equivalent to the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `wellness.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
}

/// REST backend configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:9000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Application shell configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "HealthCare System".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            },
            app: AppConfig::default(),
        }
    }

    /// Builder method to set the application title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.app.title = title.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "wellness.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
        assert_eq!(config.app.title, "HealthCare System");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://wellness.example.org/api/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://wellness.example.org/api");
        assert_eq!(config.app.title, "HealthCare System");
    }

    #[test]
    fn test_builder_trims_base_url() {
        let config = ClientConfig::new("http://api.local/").with_title("Clinic");
        assert_eq!(config.api.base_url, "http://api.local");
        assert_eq!(config.app.title, "Clinic");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(ClientConfig::from_toml("[api\nbase_url = 3").is_err());
    }
}
