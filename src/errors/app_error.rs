//! HTTP-facing error type.
//!
//! Every generation failure is reported to the caller as
//! `{"error": "<message>", "kind": "<failure kind>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::core::tts::{FailureKind, TTSError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Generation(#[from] TTSError),

    /// The request body could not be read as a form submission
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    kind: &'a str,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Generation(e) => e.kind().as_str(),
            AppError::InvalidBody(_) => "invalid_body",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Generation(e) => match e.kind() {
                FailureKind::MissingInput | FailureKind::InvalidSelection => {
                    StatusCode::BAD_REQUEST
                }
                FailureKind::RemoteCallFailure | FailureKind::UnexpectedResponseShape => {
                    StatusCode::BAD_GATEWAY
                }
                FailureKind::ContainerWriteFailure | FailureKind::Configuration => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}
