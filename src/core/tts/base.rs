//! Shared TTS types: the error taxonomy and the remote service seam.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::gemini::messages::GenerateContentResponse;
use super::pipeline::GenerationRequest;

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;

/// Machine-readable tag for a [`TTSError`].
///
/// Callers branch on the kind instead of matching error strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingInput,
    InvalidSelection,
    RemoteCallFailure,
    UnexpectedResponseShape,
    ContainerWriteFailure,
    Configuration,
}

impl FailureKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::InvalidSelection => "invalid_selection",
            Self::RemoteCallFailure => "remote_call_failure",
            Self::UnexpectedResponseShape => "unexpected_response_shape",
            Self::ContainerWriteFailure => "container_write_failure",
            Self::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while turning a form submission into a WAV file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TTSError {
    /// Credential, style prompt or script absent. Detected before any remote call.
    #[error("{0}")]
    MissingInput(String),

    /// Selected label is not one of the catalog's rendered labels
    #[error("Unknown voice selection: {0}")]
    InvalidSelection(String),

    /// Any failure raised by the remote generation service
    #[error("Remote generation failed{}: {message}", status_suffix(.status.as_ref()))]
    RemoteCallFailure {
        status: Option<u16>,
        message: String,
    },

    /// Response lacks the candidate/part/inline-data path
    #[error("Unexpected response from generation service: {0}")]
    UnexpectedResponseShape(String),

    /// Writing the WAV file to disk failed
    #[error("Failed to write audio file: {0}")]
    ContainerWriteFailure(String),

    /// Invalid format parameters or client setup
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

fn status_suffix(status: Option<&u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl TTSError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingInput(_) => FailureKind::MissingInput,
            Self::InvalidSelection(_) => FailureKind::InvalidSelection,
            Self::RemoteCallFailure { .. } => FailureKind::RemoteCallFailure,
            Self::UnexpectedResponseShape(_) => FailureKind::UnexpectedResponseShape,
            Self::ContainerWriteFailure(_) => FailureKind::ContainerWriteFailure,
            Self::ConfigurationError(_) => FailureKind::Configuration,
        }
    }

    pub(crate) fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RemoteCallFailure {
            status,
            message: message.into(),
        }
    }
}

/// The remote speech generation service.
///
/// One call per submission. Implementations must not retry.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Send one generation request and return the parsed response body.
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> TTSResult<GenerateContentResponse>;

    /// Name used in logs
    fn provider_name(&self) -> &'static str;
}
