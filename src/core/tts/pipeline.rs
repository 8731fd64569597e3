//! Form submission to WAV file.
//!
//! One submission runs `Idle -> Validating -> Calling -> Transforming -> Done`
//! and stops at `Failed` on the first error. Nothing is retained between
//! submissions: the WAV bytes are returned to the caller instead of being
//! written to a shared file.

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::base::{SpeechService, TTSError, TTSResult};
use super::catalog::{self, DEFAULT_VOICE_ID};
use super::wav::{self, PcmFormat};

/// Download name offered for generated audio.
pub const OUTPUT_FILE_NAME: &str = "output.wav";

/// MIME type of generated audio.
pub const OUTPUT_CONTENT_TYPE: &str = "audio/wav";

const MISSING_API_KEY: &str = "Please enter your Gemini API key.";
const MISSING_STYLE_OR_SCRIPT: &str = "Please enter both a speaking style and script.";

// =============================================================================
// Inputs
// =============================================================================

/// Raw values collected by the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpeechForm {
    pub api_key: String,
    /// Rendered catalog label; `None` selects the default voice
    pub voice: Option<String>,
    pub style_prompt: String,
    pub script: String,
}

/// A validated generation request.
///
/// The credential is wiped from memory when the request is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct GenerationRequest {
    api_key: String,
    voice_id: String,
    style_prompt: String,
    script_text: String,
}

impl GenerationRequest {
    pub fn new(
        api_key: impl Into<String>,
        voice_id: impl Into<String>,
        style_prompt: impl Into<String>,
        script_text: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            voice_id: voice_id.into(),
            style_prompt: style_prompt.into(),
            script_text: script_text.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn style_prompt(&self) -> &str {
        &self.style_prompt
    }

    pub fn script_text(&self) -> &str {
        &self.script_text
    }

    /// Text sent to the model: `"<style prompt>: <script>"`.
    pub fn prompt_text(&self) -> String {
        format!("{}: {}", self.style_prompt, self.script_text)
    }
}

impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("api_key", &"<redacted>")
            .field("voice_id", &self.voice_id)
            .field("style_prompt", &self.style_prompt)
            .field("script_text", &self.script_text)
            .finish()
    }
}

impl SpeechForm {
    /// Check required fields and resolve the voice label.
    ///
    /// Empty means zero-length; whitespace-only input is passed through.
    pub fn validate(&self) -> TTSResult<GenerationRequest> {
        if self.api_key.is_empty() {
            return Err(TTSError::MissingInput(MISSING_API_KEY.to_string()));
        }
        if self.style_prompt.is_empty() || self.script.is_empty() {
            return Err(TTSError::MissingInput(MISSING_STYLE_OR_SCRIPT.to_string()));
        }

        let voice_id = match self.voice.as_deref() {
            Some(label) => catalog::resolve(label)?,
            None => DEFAULT_VOICE_ID,
        };

        Ok(GenerationRequest::new(
            self.api_key.as_str(),
            voice_id,
            self.style_prompt.as_str(),
            self.script.as_str(),
        ))
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// Stages of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Idle,
    Validating,
    Calling,
    Transforming,
    Done,
    Failed,
}

/// A playable WAV file held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAudio {
    pub wav: Bytes,
    pub format: PcmFormat,
    pub voice_id: String,
}

impl GeneratedAudio {
    pub fn file_name(&self) -> &'static str {
        OUTPUT_FILE_NAME
    }

    pub fn content_type(&self) -> &'static str {
        OUTPUT_CONTENT_TYPE
    }

    pub fn pcm_len(&self) -> usize {
        self.wav.len().saturating_sub(wav::HEADER_SIZE)
    }

    pub fn duration_secs(&self) -> f64 {
        self.format.duration_secs(self.pcm_len())
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Drives one submission through validation, the remote call and WAV wrapping.
#[derive(Clone)]
pub struct SpeechPipeline {
    service: Arc<dyn SpeechService>,
}

impl SpeechPipeline {
    pub fn new(service: Arc<dyn SpeechService>) -> Self {
        Self { service }
    }

    /// Run a full submission.
    pub async fn run(&self, form: &SpeechForm) -> TTSResult<GeneratedAudio> {
        let mut stage = GenerationStage::Idle;
        let result = self.run_stages(form, &mut stage).await;

        match &result {
            Ok(audio) => info!(
                "Generated {:.2}s of audio with voice {} ({} bytes)",
                audio.duration_secs(),
                audio.voice_id,
                audio.wav.len()
            ),
            Err(e) => {
                warn!("Generation failed during {:?}: [{}] {}", stage, e.kind(), e);
                advance(&mut stage, GenerationStage::Failed);
            }
        }

        result
    }

    async fn run_stages(
        &self,
        form: &SpeechForm,
        stage: &mut GenerationStage,
    ) -> TTSResult<GeneratedAudio> {
        advance(stage, GenerationStage::Validating);
        let request = form.validate()?;

        advance(stage, GenerationStage::Calling);
        let response = self.service.generate_content(&request).await?;

        advance(stage, GenerationStage::Transforming);
        let inline = response.first_inline_data()?;
        let pcm = inline.decode()?;

        let format = PcmFormat::from_mime_type(&inline.mime_type).unwrap_or_else(|| {
            warn!(
                "Unrecognised audio type '{}' from {}; assuming 16-bit mono 24 kHz PCM",
                inline.mime_type,
                self.service.provider_name()
            );
            PcmFormat::default()
        });

        let audio = GeneratedAudio {
            wav: Bytes::from(wav::write_wav(&pcm, format)?),
            format,
            voice_id: request.voice_id().to_string(),
        };

        advance(stage, GenerationStage::Done);
        Ok(audio)
    }
}

fn advance(stage: &mut GenerationStage, next: GenerationStage) {
    debug!("Generation stage {:?} -> {:?}", stage, next);
    *stage = next;
}
