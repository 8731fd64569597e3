mod base;
pub mod catalog;
pub mod gemini;
pub mod pipeline;
pub mod wav;

pub use base::{FailureKind, SpeechService, TTSError, TTSResult};
pub use catalog::{DEFAULT_VOICE_ID, VoiceOption};
pub use gemini::{GeminiTTS, GeminiTTSConfig, GeminiTTSModel};
pub use pipeline::{
    GeneratedAudio, GenerationRequest, GenerationStage, OUTPUT_CONTENT_TYPE, OUTPUT_FILE_NAME,
    SpeechForm, SpeechPipeline,
};
pub use wav::{PcmFormat, write_wav, write_wav_file};
