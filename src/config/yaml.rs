use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///
/// gemini:
///   base_url: "https://generativelanguage.googleapis.com"
///   model: "gemini-2.5-flash-preview-tts"
///   timeout_seconds: 120
///   connect_timeout_seconds: 30
///
/// security:
///   cors_allowed_origins: "https://studio.example.com"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub gemini: Option<GeminiYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Gemini API connection settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeminiYaml {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self, super::ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            super::ConfigError::Io(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from YAML text
    pub fn parse(contents: &str) -> Result<Self, super::ConfigError> {
        serde_yaml::from_str(contents)
            .map_err(|e| super::ConfigError::Parse(format!("Failed to parse YAML config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080

gemini:
  base_url: "http://localhost:9000"
  model: "gemini-2.5-pro-preview-tts"
  timeout_seconds: 60
  connect_timeout_seconds: 5

security:
  cors_allowed_origins: "*"
"#;

        let config = YamlConfig::parse(yaml).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(8080));

        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(gemini.model.as_deref(), Some("gemini-2.5-pro-preview-tts"));
        assert_eq!(gemini.timeout_seconds, Some(60));
        assert_eq!(gemini.connect_timeout_seconds, Some(5));

        assert_eq!(
            config.security.unwrap().cors_allowed_origins.as_deref(),
            Some("*")
        );
    }

    #[test]
    fn test_yaml_config_partial() {
        let config = YamlConfig::parse("server:\n  port: 4000\n").unwrap();
        assert_eq!(config.server.unwrap().port, Some(4000));
        assert!(config.gemini.is_none());
        assert!(config.security.is_none());
    }

    #[test]
    fn test_yaml_config_empty() {
        let config = YamlConfig::parse("{}").unwrap();
        assert!(config.server.is_none());
    }

    #[test]
    fn test_yaml_config_invalid() {
        assert!(YamlConfig::parse("server:\n  port: not-a-port\n").is_err());
    }

    #[test]
    fn test_yaml_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "gemini:\n  model: custom-tts\n").unwrap();

        let config = YamlConfig::from_file(&config_path).unwrap();
        assert_eq!(config.gemini.unwrap().model.as_deref(), Some("custom-tts"));
    }

    #[test]
    fn test_yaml_config_missing_file() {
        let path = PathBuf::from("/nonexistent/config.yaml");
        assert!(YamlConfig::from_file(&path).is_err());
    }
}
