//! Configuration validation logic.

use super::{ConfigError, ServerConfig};

pub fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::InvalidValue("Host cannot be empty".to_string()));
    }

    if config.port == 0 {
        return Err(ConfigError::InvalidValue(
            "Port must be between 1 and 65535".to_string(),
        ));
    }

    config.gemini.validate().map_err(ConfigError::InvalidValue)?;

    if let Some(origins) = &config.cors_allowed_origins
        && origins.trim().is_empty()
    {
        return Err(ConfigError::InvalidValue(
            "CORS allowed origins cannot be blank; unset it for same-origin only".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge::merge_config;
    use crate::config::env::EnvConfig;

    fn valid() -> ServerConfig {
        merge_config(EnvConfig::default(), None)
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_server_config(&valid()).is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = valid();
        config.port = 0;
        assert!(validate_server_config(&config).is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = valid();
        config.gemini.base_url = "generativelanguage".to_string();
        let err = validate_server_config(&config).unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid();
        config.gemini.connect_timeout_secs = 0;
        assert!(validate_server_config(&config).is_err());
    }

    #[test]
    fn test_blank_cors_rejected() {
        let mut config = valid();
        config.cors_allowed_origins = Some(" ".to_string());
        assert!(validate_server_config(&config).is_err());
    }
}
