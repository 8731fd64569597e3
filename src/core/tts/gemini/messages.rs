//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the fields needed for single-speaker speech generation are modelled.
//! Unknown response fields are ignored.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::tts::base::{TTSError, TTSResult};

/// Output modality requested from the model.
pub const AUDIO_MODALITY: &str = "AUDIO";

// =============================================================================
// Request
// =============================================================================

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn speech request for one prebuilt voice.
    pub fn speech(text: impl Into<String>, voice_name: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(text)],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec![AUDIO_MODALITY.to_string()],
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice_name.into(),
                        },
                    },
                }),
            },
        }
    }

    /// Text of the first part of the first content entry.
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .first()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    /// Prebuilt voice requested, if any.
    pub fn voice_name(&self) -> Option<&str> {
        self.generation_config
            .speech_config
            .as_ref()
            .map(|sc| sc.voice_config.prebuilt_voice_config.voice_name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

// =============================================================================
// Shared content types
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Binary payload embedded in a response part.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    /// Base64 encoded bytes
    pub data: String,
}

impl InlineData {
    /// Decode the base64 payload.
    pub fn decode(&self) -> TTSResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| {
                TTSError::UnexpectedResponseShape(format!("inline data is not valid base64: {e}"))
            })
    }
}

// =============================================================================
// Response
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Wrap a raw PCM payload the way the service returns it.
    pub fn with_audio(pcm: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.into(),
                            data: base64::engine::general_purpose::STANDARD.encode(pcm),
                        }),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            model_version: None,
        }
    }

    /// The first part of the first candidate, which must carry inline data.
    pub fn first_inline_data(&self) -> TTSResult<&InlineData> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| TTSError::UnexpectedResponseShape("no candidates".to_string()))?;

        let content = candidate.content.as_ref().ok_or_else(|| {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            TTSError::UnexpectedResponseShape(format!(
                "candidate has no content (finish reason: {reason})"
            ))
        })?;

        let part = content
            .parts
            .first()
            .ok_or_else(|| TTSError::UnexpectedResponseShape("candidate has no parts".to_string()))?;

        part.inline_data.as_ref().ok_or_else(|| {
            TTSError::UnexpectedResponseShape("first part has no inline data".to_string())
        })
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: GeminiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::base::FailureKind;
    use serde_json::json;

    #[test]
    fn test_speech_request_serialization() {
        let request = GenerateContentRequest::speech("Calm tone: Hello world", "Kore");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "Calm tone: Hello world"}]}],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": {
                            "prebuiltVoiceConfig": {"voiceName": "Kore"}
                        }
                    }
                }
            })
        );
        assert_eq!(request.prompt_text(), Some("Calm tone: Hello world"));
        assert_eq!(request.voice_name(), Some("Kore"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAEC"}}]
                },
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 9},
            "modelVersion": "gemini-2.5-flash-preview-tts"
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let inline = response.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "audio/L16;codec=pcm;rate=24000");
        assert_eq!(inline.decode().unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn test_missing_paths_are_shape_errors() {
        let bodies = [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{"finishReason": "SAFETY"}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": "no audio"}]}}]}),
        ];

        for body in bodies {
            let response: GenerateContentResponse = serde_json::from_value(body.clone()).unwrap();
            let err = response.first_inline_data().unwrap_err();
            assert_eq!(err.kind(), FailureKind::UnexpectedResponseShape, "{body}");
        }
    }

    #[test]
    fn test_invalid_base64_is_shape_error() {
        let inline = InlineData {
            mime_type: "audio/L16".to_string(),
            data: "not base64!".to_string(),
        };
        assert_eq!(
            inline.decode().unwrap_err().kind(),
            FailureKind::UnexpectedResponseShape
        );
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.code, Some(400));
        assert_eq!(parsed.error.status.as_deref(), Some("INVALID_ARGUMENT"));
        assert!(parsed.error.message.starts_with("API key not valid"));
    }
}
