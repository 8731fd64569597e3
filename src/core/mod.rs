pub mod tts;

// Re-export commonly used types for convenience
pub use tts::{
    FailureKind, GeminiTTS, GeminiTTSConfig, GeneratedAudio, GenerationRequest, PcmFormat,
    SpeechForm, SpeechPipeline, SpeechService, TTSError, TTSResult,
};
