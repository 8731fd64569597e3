//! Gemini TTS configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

// =============================================================================
// Model
// =============================================================================

/// Gemini models with native speech output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "String", from = "String")]
pub enum GeminiTTSModel {
    /// gemini-2.5-flash-preview-tts (default)
    #[default]
    Flash25PreviewTts,
    /// gemini-2.5-pro-preview-tts
    Pro25PreviewTts,
    /// Any other model name, passed through unchanged
    Custom(String),
}

impl GeminiTTSModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Flash25PreviewTts => DEFAULT_MODEL,
            Self::Pro25PreviewTts => "gemini-2.5-pro-preview-tts",
            Self::Custom(name) => name,
        }
    }

    /// Parse a model name. Blank input selects the default model.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "" | DEFAULT_MODEL => Self::Flash25PreviewTts,
            "gemini-2.5-pro-preview-tts" => Self::Pro25PreviewTts,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<String> for GeminiTTSModel {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<GeminiTTSModel> for String {
    fn from(value: GeminiTTSModel) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for GeminiTTSModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Provider configuration
// =============================================================================

/// Connection settings for the Gemini API.
///
/// The credential is not part of this configuration; it arrives with each
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiTTSConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com`
    pub base_url: String,
    pub model: GeminiTTSModel,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for GeminiTTSConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: GeminiTTSModel::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl GeminiTTSConfig {
    /// Full `generateContent` URL for the configured model.
    pub fn api_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model.as_str()
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid Gemini base URL '{}': {e}", self.base_url))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "Gemini base URL must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        if self.model.as_str().trim().is_empty() {
            return Err("Gemini model name cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Gemini request timeout must be greater than 0".to_string());
        }

        if self.connect_timeout_secs == 0 {
            return Err("Gemini connect timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
