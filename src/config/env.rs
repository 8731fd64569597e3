//! Environment variable loading.

use super::ConfigError;

/// Raw values read from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub gemini_base_url: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_timeout_seconds: Option<u64>,
    pub gemini_connect_timeout_seconds: Option<u64>,
    pub cors_allowed_origins: Option<String>,
}

impl EnvConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_var("HOST"),
            port: parse_env("PORT")?,
            gemini_base_url: env_var("GEMINI_BASE_URL"),
            gemini_model: env_var("GEMINI_TTS_MODEL"),
            gemini_timeout_seconds: parse_env("GEMINI_TIMEOUT_SECONDS")?,
            gemini_connect_timeout_seconds: parse_env("GEMINI_CONNECT_TIMEOUT_SECONDS")?,
            cors_allowed_origins: env_var("CORS_ALLOWED_ORIGINS"),
        })
    }
}

/// Non-empty value of an environment variable.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidValue(format!("{key}='{raw}': {e}")))
        })
        .transpose()
}
