use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, form, speak, voices};
use crate::state::AppState;
use std::sync::Arc;

/// Create the router serving the form page and its API
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(form::form_page))
        .route("/health", get(api::health_check))
        .route("/voices", get(voices::list_voices))
        .route("/speak", post(speak::speak_handler))
        .layer(TraceLayer::new_for_http())
}
