//! Layering of defaults, environment and YAML.

use super::env::EnvConfig;
use super::yaml::YamlConfig;
use super::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
use crate::core::tts::{GeminiTTSConfig, GeminiTTSModel};

/// Combine environment values with optional YAML overrides.
///
/// Priority: YAML > environment > defaults.
pub fn merge_config(env: EnvConfig, yaml: Option<YamlConfig>) -> ServerConfig {
    let yaml = yaml.unwrap_or_default();
    let server = yaml.server.unwrap_or_default();
    let gemini = yaml.gemini.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();

    let defaults = GeminiTTSConfig::default();

    let model = gemini
        .model
        .or(env.gemini_model)
        .map(|name| GeminiTTSModel::from_name(&name))
        .unwrap_or(defaults.model);

    ServerConfig {
        host: server
            .host
            .or(env.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: server.port.or(env.port).unwrap_or(DEFAULT_PORT),
        gemini: GeminiTTSConfig {
            base_url: gemini
                .base_url
                .or(env.gemini_base_url)
                .unwrap_or(defaults.base_url),
            model,
            timeout_secs: gemini
                .timeout_seconds
                .or(env.gemini_timeout_seconds)
                .unwrap_or(defaults.timeout_secs),
            connect_timeout_secs: gemini
                .connect_timeout_seconds
                .or(env.gemini_connect_timeout_seconds)
                .unwrap_or(defaults.connect_timeout_secs),
        },
        cors_allowed_origins: security.cors_allowed_origins.or(env.cors_allowed_origins),
    }
}
