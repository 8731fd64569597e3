//! Gemini TTS client.
//!
//! Speech generation is a single REST call: the style prompt and script are
//! sent as one text part, the voice as a prebuilt voice config, and the audio
//! comes back base64-encoded in the first candidate's inline data.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use super::config::GeminiTTSConfig;
use super::messages::{GeminiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::core::tts::base::{SpeechService, TTSError, TTSResult};
use crate::core::tts::pipeline::GenerationRequest;

/// Header carrying the user's credential.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("gemini-tts-studio/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiTTS {
    http_client: Client,
    config: GeminiTTSConfig,
}

impl GeminiTTS {
    /// Create a client with its own connection pool.
    pub fn new(config: GeminiTTSConfig) -> TTSResult<Self> {
        config.validate().map_err(TTSError::ConfigurationError)?;

        let http_client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                TTSError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        if !config.model.is_known() {
            info!(
                "Using unrecognised Gemini model '{}'; audio output is not guaranteed",
                config.model
            );
        }

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &GeminiTTSConfig {
        &self.config
    }

    /// Build the HTTP request for one generation.
    pub(crate) fn build_http_request(
        &self,
        request: &GenerationRequest,
    ) -> reqwest::RequestBuilder {
        let body = GenerateContentRequest::speech(request.prompt_text(), request.voice_id());

        self.http_client
            .post(self.config.api_url())
            .header(API_KEY_HEADER, request.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> TTSError {
        let message = match serde_json::from_str::<GeminiErrorResponse>(body) {
            Ok(parsed) => match parsed.error.status {
                Some(code) => format!("{} ({code})", parsed.error.message),
                None => parsed.error.message,
            },
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string(),
            Err(_) => body.trim().to_string(),
        };

        TTSError::remote(Some(status.as_u16()), message)
    }
}

#[async_trait]
impl SpeechService for GeminiTTS {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> TTSResult<GenerateContentResponse> {
        debug!(
            "Sending Gemini TTS request: model={}, voice={}, chars={}",
            self.config.model,
            request.voice_id(),
            request.prompt_text().chars().count()
        );

        let response = self
            .build_http_request(request)
            .send()
            .await
            .map_err(|e| TTSError::remote(None, format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TTSError::remote(Some(status.as_u16()), format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let err = Self::classify_error(status, &body);
            error!("Gemini TTS request rejected: {}", err);
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            TTSError::UnexpectedResponseShape(format!("Failed to parse response: {e}"))
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
