//! End-to-end tests for the studio router.
//!
//! The Gemini API is replaced by a wiremock server; requests go through the
//! real router, pipeline and REST client.

use std::io::Cursor;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine;
use serde_json::{Value, json};
use tower::util::ServiceExt;
use wiremock::matchers::{body_json, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gemini_tts_studio::{GeminiTTSConfig, ServerConfig, routes, state::AppState};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash-preview-tts:generateContent";
const KORE_LABEL: &str = "Kore — Firm (F)";

/// Minimal configuration pointing the Gemini client at the mock server
fn create_test_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3001,
        gemini: GeminiTTSConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 5,
            ..Default::default()
        },
        cors_allowed_origins: None,
    }
}

async fn create_app(server: &MockServer) -> Router {
    let state = AppState::new(create_test_config(&server.uri()))
        .await
        .unwrap();
    routes::api::create_api_router().with_state(state)
}

fn audio_response(pcm: &[u8]) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{
                    "inlineData": {
                        "mimeType": "audio/L16;codec=pcm;rate=24000",
                        "data": base64::engine::general_purpose::STANDARD.encode(pcm)
                    }
                }]
            },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.5-flash-preview-tts"
    })
}

fn speak_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/speak")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn test_speak_returns_playable_wav() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header_eq("x-goog-api-key", "k"))
        .and(body_json(json!({
            "contents": [{"parts": [{"text": "Calm tone: Hello world"}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Kore"}}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_response(&[0u8; 24000])))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(&server).await;
    let response = app
        .oneshot(speak_request(json!({
            "api_key": "k",
            "voice": KORE_LABEL,
            "style_prompt": "Calm tone",
            "script": "Hello world"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"output.wav\""
    );

    let wav = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(wav.len(), 24044);

    let reader = hound::WavReader::new(Cursor::new(wav.to_vec())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 24000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 12000);
}

#[tokio::test]
async fn test_speak_credential_from_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header_eq("x-goog-api-key", "header-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_response(&[0u8; 4])))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_app(&server).await;
    let mut request = speak_request(json!({
        "style_prompt": "Warm",
        "script": "Hi"
    }));
    request
        .headers_mut()
        .insert("x-provider-api-key", "header-key".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_speak_missing_script_never_calls_remote() {
    let server = MockServer::start().await;
    let app = create_app(&server).await;

    let response = app
        .oneshot(speak_request(json!({
            "api_key": "k",
            "voice": KORE_LABEL,
            "style_prompt": "Calm tone",
            "script": ""
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["kind"], "missing_input");
    assert_eq!(json["error"], "Please enter both a speaking style and script.");

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_speak_missing_credential() {
    let server = MockServer::start().await;
    let app = create_app(&server).await;

    let response = app
        .oneshot(speak_request(json!({
            "style_prompt": "Calm tone",
            "script": "Hello world"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Please enter your Gemini API key.");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_speak_unknown_voice() {
    let server = MockServer::start().await;
    let app = create_app(&server).await;

    let response = app
        .oneshot(speak_request(json!({
            "api_key": "k",
            "voice": "Nobody — Silent",
            "style_prompt": "Calm tone",
            "script": "Hello world"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["kind"], "invalid_selection");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_speak_remote_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "code": 401,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "UNAUTHENTICATED"
            }
        })))
        .mount(&server)
        .await;

    let app = create_app(&server).await;
    let response = app
        .oneshot(speak_request(json!({
            "api_key": "bad",
            "style_prompt": "Calm tone",
            "script": "Hello world"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["kind"], "remote_call_failure");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("401"));
    assert!(message.contains("API key not valid"));
}

#[tokio::test]
async fn test_speak_empty_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let app = create_app(&server).await;
    let response = app
        .oneshot(speak_request(json!({
            "api_key": "k",
            "style_prompt": "Calm tone",
            "script": "Hello world"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(response).await["kind"], "unexpected_response_shape");
}

#[tokio::test]
async fn test_speak_malformed_body() {
    let server = MockServer::start().await;
    let app = create_app(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/speak")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["kind"], "invalid_body");
}

// =============================================================================
// Page, catalog and health
// =============================================================================

#[tokio::test]
async fn test_form_page_lists_voices() {
    let server = MockServer::start().await;
    let app = create_app(&server).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("<option value=\"Zephyr — Bright (F)\">"));
    assert!(page.contains("<option value=\"Kore — Firm (F)\" selected>"));
    assert!(page.contains("Sulafat — Warm (F)"));
}

#[tokio::test]
async fn test_voices_endpoint() {
    let server = MockServer::start().await;
    let app = create_app(&server).await;

    let response = app
        .oneshot(Request::builder().uri("/voices").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["default"], "Kore");
    let voices = json["voices"].as_array().unwrap();
    assert_eq!(voices.len(), 30);
    assert_eq!(voices[3]["id"], "Kore");
    assert_eq!(voices[3]["label"], "Firm (F)");
    assert_eq!(voices[3]["display"], KORE_LABEL);
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    let app = create_app(&server).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "OK");
}
