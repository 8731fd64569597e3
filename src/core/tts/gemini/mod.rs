//! Google Gemini speech generation provider.
//!
//! # API Reference
//!
//! - Endpoint: `POST {base}/v1beta/models/{model}:generateContent`
//! - Auth: `x-goog-api-key` header, supplied by the user per request
//! - Models: gemini-2.5-flash-preview-tts, gemini-2.5-pro-preview-tts
//! - Output: base64 linear PCM, 16-bit mono at 24 kHz
//!   (`audio/L16;codec=pcm;rate=24000`)

pub mod client;
pub mod config;
pub mod messages;

pub use client::{API_KEY_HEADER, GeminiTTS};
pub use config::{GeminiTTSConfig, GeminiTTSModel};
pub use messages::{GenerateContentRequest, GenerateContentResponse, InlineData};

/// Public Gemini API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Generation can take a while for long scripts.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
