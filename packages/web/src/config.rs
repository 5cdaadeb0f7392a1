//! Build-time client configuration.

use store::ClientConfig;

const WELLNESS_TOML: &str = include_str!("../wellness.toml");

/// The embedded `wellness.toml`, with `WELLNESS_API_URL` (read at build time)
/// taking precedence over its `base_url`.
pub fn load() -> ClientConfig {
    resolve(WELLNESS_TOML, option_env!("WELLNESS_API_URL"))
}

fn resolve(raw: &str, api_url: Option<&str>) -> ClientConfig {
    let config = ClientConfig::from_toml(raw).unwrap_or_else(|e| {
        tracing::warn!("Invalid {}, using defaults: {}", ClientConfig::filename(), e);
        ClientConfig::default()
    });
    match api_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => ClientConfig::new(url).with_title(config.app.title),
        None => config,
    }
}
