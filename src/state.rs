use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::tts::{GeminiTTS, SpeechPipeline, SpeechService, TTSResult};

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    pub pipeline: SpeechPipeline,
}

impl AppState {
    /// Build state backed by the Gemini REST client
    pub async fn new(config: ServerConfig) -> TTSResult<Arc<Self>> {
        let service = GeminiTTS::new(config.gemini.clone())?;
        info!(
            "Using Gemini model {} at {}",
            config.gemini.model, config.gemini.base_url
        );
        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Build state around any speech backend
    pub fn with_service(config: ServerConfig, service: Arc<dyn SpeechService>) -> Arc<Self> {
        Arc::new(Self {
            config,
            pipeline: SpeechPipeline::new(service),
        })
    }
}
