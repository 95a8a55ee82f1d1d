//! End-to-end strategy flow against a local generateContent stand-in.
//!
//! Each test serves a canned Gemini envelope from an axum server bound to
//! 127.0.0.1:0 and drives the real `GeminiClient` through the controller.

use ads_common::config::ApiSettings;
use ads_common::{
    AppState, GeminiClient, Phase, StrategyController, StrategyErrorKind, StrategyForm,
    StrategyService, GENERIC_FAILURE_MESSAGE,
};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const FIXTURE: &str = include_str!("fixtures/report.json");

#[derive(Clone, Default)]
struct Recorded {
    hits: Arc<Mutex<usize>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    keys: Arc<Mutex<Vec<String>>>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    recorded: Recorded,
}

async fn generate_content(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *state.recorded.hits.lock().unwrap() += 1;
    state.recorded.bodies.lock().unwrap().push(body);
    if let Some(key) = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
        state.recorded.keys.lock().unwrap().push(key.to_string());
    }
    (state.status, Json(state.reply.clone()))
}

/// Start the stand-in and return its base URL
async fn spawn_mock(status: StatusCode, reply: Value) -> (String, Recorded) {
    let recorded = Recorded::default();
    let state = MockState {
        status,
        reply,
        recorded: recorded.clone(),
    };
    let app = Router::new()
        .route("/v1beta/models/:call", post(generate_content))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), recorded)
}

fn envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn controller(endpoint: String, key_env: &str) -> StrategyController<GeminiClient> {
    let settings = ApiSettings {
        endpoint,
        api_key_env: key_env.to_string(),
        timeout_secs: 10,
        ..ApiSettings::default()
    };
    StrategyController::new(StrategyService::gemini(settings).unwrap())
}

fn handbag_form() -> StrategyForm {
    StrategyForm::new("Luxury Leather Handbags", "Delhi, India", "20000")
}

#[tokio::test]
async fn test_successful_generation_end_to_end() {
    std::env::set_var("ADS_FLOW_KEY_SUCCESS", "test-key-123");
    let (endpoint, recorded) = spawn_mock(StatusCode::OK, envelope(FIXTURE)).await;
    let mut controller = controller(endpoint, "ADS_FLOW_KEY_SUCCESS");

    let state = controller.submit(&handbag_form()).await.unwrap();

    let report = state.report().expect("report rendered");
    assert_eq!(report.budget_recommendation.user_budget, "20000");
    assert_eq!(report.detailed_targeting.interests.len(), 3);
    assert_eq!(report.competitor_analysis[0].name, "Hidesign");
    assert_eq!(controller.state().phase(), Phase::Success);

    assert_eq!(*recorded.hits.lock().unwrap(), 1);
    assert_eq!(recorded.keys.lock().unwrap().as_slice(), ["test-key-123"]);

    let bodies = recorded.bodies.lock().unwrap();
    let prompt = bodies[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Luxury Leather Handbags"));
    assert!(prompt.contains("Delhi, India"));
    assert!(prompt.contains("20000"));
    assert_eq!(
        bodies[0]["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(bodies[0]["generationConfig"]["responseSchema"]["type"], "OBJECT");
}

#[tokio::test]
async fn test_response_text_is_trimmed_before_parsing() {
    std::env::set_var("ADS_FLOW_KEY_TRIM", "k");
    let padded = format!("\n\n  {}  \n", FIXTURE);
    let (endpoint, _) = spawn_mock(StatusCode::OK, envelope(&padded)).await;
    let mut controller = controller(endpoint, "ADS_FLOW_KEY_TRIM");

    let state = controller.submit(&handbag_form()).await.unwrap();
    assert!(matches!(state, AppState::Success(_)));
}

#[tokio::test]
async fn test_non_json_text_fails_with_generic_message() {
    std::env::set_var("ADS_FLOW_KEY_PROSE", "k");
    let (endpoint, recorded) =
        spawn_mock(StatusCode::OK, envelope("Sure! Here is your strategy:")).await;
    let mut controller = controller(endpoint, "ADS_FLOW_KEY_PROSE");

    let state = controller.submit(&handbag_form()).await.unwrap();

    assert_eq!(state.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(
        controller.last_error_kind(),
        Some(StrategyErrorKind::MalformedResponse)
    );
    assert_eq!(*recorded.hits.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_incomplete_report_is_rejected() {
    std::env::set_var("ADS_FLOW_KEY_PARTIAL", "k");
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value.as_object_mut().unwrap().remove("competitorAnalysis");
    let (endpoint, _) = spawn_mock(StatusCode::OK, envelope(&value.to_string())).await;
    let mut controller = controller(endpoint, "ADS_FLOW_KEY_PARTIAL");

    let state = controller.submit(&handbag_form()).await.unwrap();

    assert_eq!(state.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(
        controller.last_error_kind(),
        Some(StrategyErrorKind::MalformedResponse)
    );
}

#[tokio::test]
async fn test_server_error_is_transport_failure_without_retry() {
    std::env::set_var("ADS_FLOW_KEY_500", "k");
    let (endpoint, recorded) = spawn_mock(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"code": 500, "message": "internal"}}),
    )
    .await;
    let mut controller = controller(endpoint, "ADS_FLOW_KEY_500");

    let state = controller.submit(&handbag_form()).await.unwrap();

    assert_eq!(state.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(controller.last_error_kind(), Some(StrategyErrorKind::Transport));
    assert_eq!(*recorded.hits.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_missing_credential_never_reaches_network() {
    std::env::remove_var("ADS_FLOW_KEY_NEVER_SET");
    let (endpoint, recorded) = spawn_mock(StatusCode::OK, envelope(FIXTURE)).await;
    let mut controller = controller(endpoint, "ADS_FLOW_KEY_NEVER_SET");

    let state = controller.submit(&handbag_form()).await.unwrap();

    assert_eq!(state.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(
        controller.last_error_kind(),
        Some(StrategyErrorKind::Configuration)
    );
    assert_eq!(*recorded.hits.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_blank_form_is_not_submitted() {
    std::env::set_var("ADS_FLOW_KEY_BLANK", "k");
    let (endpoint, recorded) = spawn_mock(StatusCode::OK, envelope(FIXTURE)).await;
    let mut controller = controller(endpoint, "ADS_FLOW_KEY_BLANK");

    let form = StrategyForm::new("Luxury Leather Handbags", "   ", "20000");
    assert!(controller.submit(&form).await.is_err());

    assert_eq!(controller.state(), &AppState::Idle);
    assert_eq!(*recorded.hits.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_resubmit_after_failure() {
    std::env::set_var("ADS_FLOW_KEY_RETRY", "k");
    let (bad, _) = spawn_mock(StatusCode::OK, envelope("not json")).await;
    let (good, _) = spawn_mock(StatusCode::OK, envelope(FIXTURE)).await;

    let mut failing = controller(bad, "ADS_FLOW_KEY_RETRY");
    failing.submit(&handbag_form()).await.unwrap();
    assert_eq!(failing.state().phase(), Phase::Failed);

    let mut working = controller(good, "ADS_FLOW_KEY_RETRY");
    working.submit(&handbag_form()).await.unwrap();
    assert_eq!(working.state().phase(), Phase::Success);
}
