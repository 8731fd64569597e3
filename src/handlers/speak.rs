//! Text-to-speech generation endpoint.

use std::sync::Arc;

use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::core::tts::{GeneratedAudio, SpeechForm};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Header that may carry the Gemini credential instead of the body.
pub const PROVIDER_API_KEY_HEADER: &str = "x-provider-api-key";

/// Generate a WAV file from a form submission.
///
/// The body is `{api_key?, voice?, style_prompt, script}` where `voice` is a
/// rendered catalog label. A credential in the body wins over the
/// `x-provider-api-key` header.
pub async fn speak_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<SpeechForm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(mut form) = body.map_err(|e| AppError::InvalidBody(e.body_text()))?;

    if form.api_key.is_empty()
        && let Some(key) = headers
            .get(PROVIDER_API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
    {
        debug!("Using credential from {} header", PROVIDER_API_KEY_HEADER);
        form.api_key = key.to_string();
    }

    let audio = state.pipeline.run(&form).await?;
    Ok(wav_response(audio))
}

fn wav_response(audio: GeneratedAudio) -> impl IntoResponse {
    let disposition = format!("attachment; filename=\"{}\"", audio.file_name());
    (
        [
            (header::CONTENT_TYPE, audio.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        audio.wav,
    )
}
