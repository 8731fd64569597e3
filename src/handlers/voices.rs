use axum::response::Json;
use serde::Serialize;

use crate::core::tts::catalog::{self, DEFAULT_VOICE_ID};

#[derive(Debug, Clone, Serialize)]
pub struct Voice {
    /// Identifier sent to the generation API
    pub id: &'static str,
    /// Short descriptor, e.g. "Firm (F)"
    pub label: &'static str,
    /// Rendered label accepted by `/speak`
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoicesResponse {
    pub default: &'static str,
    pub voices: Vec<Voice>,
}

/// List the prebuilt voice catalog in display order.
pub async fn list_voices() -> Json<VoicesResponse> {
    let voices = catalog::list()
        .iter()
        .map(|v| Voice {
            id: v.id,
            label: v.label,
            display: v.display_label(),
        })
        .collect();

    Json(VoicesResponse {
        default: DEFAULT_VOICE_ID,
        voices,
    })
}
