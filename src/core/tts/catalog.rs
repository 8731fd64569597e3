//! Prebuilt Gemini voice catalog.
//!
//! The catalog is a fixed, ordered list of voice identifiers with a short
//! descriptor. The selection control renders each entry as
//! `"<id> — <descriptor>"` and the chosen label is resolved back to the id
//! the generation API expects.

use serde::Serialize;

use super::base::{TTSError, TTSResult};

/// Separator between id and descriptor in a rendered label (em dash).
pub const LABEL_SEPARATOR: &str = " — ";

/// Voice used when the caller makes no selection.
pub const DEFAULT_VOICE_ID: &str = "Kore";

/// A selectable prebuilt voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VoiceOption {
    /// Identifier sent to the API
    pub id: &'static str,
    /// Display-only descriptor, e.g. "Firm (F)"
    pub label: &'static str,
}

impl VoiceOption {
    const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }

    /// Rendered form shown in the selection control.
    pub fn display_label(&self) -> String {
        format!("{}{}{}", self.id, LABEL_SEPARATOR, self.label)
    }
}

static VOICES: [VoiceOption; 30] = [
    VoiceOption::new("Zephyr", "Bright (F)"),
    VoiceOption::new("Puck", "Upbeat (M)"),
    VoiceOption::new("Charon", "Informative (M)"),
    VoiceOption::new("Kore", "Firm (F)"),
    VoiceOption::new("Fenrir", "Excitable (M)"),
    VoiceOption::new("Leda", "Youthful (F)"),
    VoiceOption::new("Orus", "Firm (M)"),
    VoiceOption::new("Aoede", "Breezy (F)"),
    VoiceOption::new("Callirrhoe", "Easy-going (F)"),
    VoiceOption::new("Autonoe", "Bright (F)"),
    VoiceOption::new("Enceladus", "Breathy (M)"),
    VoiceOption::new("Iapetus", "Clear (M)"),
    VoiceOption::new("Umbriel", "Easy-going (M)"),
    VoiceOption::new("Algieba", "Smooth (M)"),
    VoiceOption::new("Despina", "Smooth (F)"),
    VoiceOption::new("Erinome", "Clear (F)"),
    VoiceOption::new("Algenib", "Gravelly (M)"),
    VoiceOption::new("Rasalgethi", "Informative (M)"),
    VoiceOption::new("Laomedeia", "Upbeat (F)"),
    VoiceOption::new("Achernar", "Soft (F)"),
    VoiceOption::new("Alnilam", "Firm (M)"),
    VoiceOption::new("Schedar", "Even (M)"),
    VoiceOption::new("Gacrux", "Mature (F)"),
    VoiceOption::new("Pulcherrima", "Forward (M)"),
    VoiceOption::new("Achird", "Friendly (M)"),
    VoiceOption::new("Zubenelgenubi", "Casual (M)"),
    VoiceOption::new("Vindemiatrix", "Gentle (F)"),
    VoiceOption::new("Sadachbia", "Lively (M)"),
    VoiceOption::new("Sadaltager", "Knowledgeable (M)"),
    VoiceOption::new("Sulafat", "Warm (F)"),
];

/// All voices, in display order.
pub fn list() -> &'static [VoiceOption] {
    &VOICES
}

/// Rendered labels, in display order.
pub fn display_labels() -> Vec<String> {
    VOICES.iter().map(VoiceOption::display_label).collect()
}

/// Look up a voice by its API identifier.
pub fn find(id: &str) -> Option<&'static VoiceOption> {
    VOICES.iter().find(|voice| voice.id == id)
}

/// The voice preselected in the form.
pub fn default_voice() -> &'static VoiceOption {
    // DEFAULT_VOICE_ID is a catalog member; covered by tests
    find(DEFAULT_VOICE_ID).unwrap_or(&VOICES[0])
}

/// Resolve a rendered label back to its voice identifier.
///
/// Only an exact `"<id> — <descriptor>"` match succeeds.
pub fn resolve(label: &str) -> TTSResult<&'static str> {
    let (id, descriptor) = label
        .split_once(LABEL_SEPARATOR)
        .ok_or_else(|| TTSError::InvalidSelection(label.to_string()))?;

    VOICES
        .iter()
        .find(|voice| voice.id == id && voice.label == descriptor)
        .map(|voice| voice.id)
        .ok_or_else(|| TTSError::InvalidSelection(label.to_string()))
}
