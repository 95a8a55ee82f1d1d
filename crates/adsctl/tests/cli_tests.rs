//! CLI integration tests for adsctl
//!
//! Runs the built binary in an isolated environment: config, state and home
//! directories all point into a temp dir and no API key is inherited.
//!
//! - adsctl render     re-render and export a saved report
//! - adsctl generate   full request against a local generateContent stand-in
//! - adsctl prompt     prompt text, blank-field rejection
//! - adsctl schema     structured-output schema
//! - adsctl config     defaults and --init

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const KEY_ENV: &str = "ADSCTL_TEST_API_KEY";

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/report.json")
}

fn fixture_text() -> String {
    fs::read_to_string(fixture_path()).unwrap()
}

/// Command with every user-level location redirected into `home`
fn adsctl(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_adsctl"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env("ADSCTL_CONFIG", home.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("ADSCTL_LOG_FILE")
        .env_remove("RUST_LOG")
        .env_remove("API_KEY")
        .env_remove(KEY_ENV);
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Point the config at `endpoint` and read the key from `KEY_ENV`
fn write_config(home: &Path, endpoint: &str) {
    let config = format!(
        "[api]\nendpoint = \"{}\"\napi_key_env = \"{}\"\ntimeout_secs = 10\n\n[export]\noutput_dir = \"{}\"\n",
        endpoint,
        KEY_ENV,
        home.join("exports").display()
    );
    fs::write(home.join("config.toml"), config).unwrap();
}

async fn spawn_mock(status: StatusCode, reply: Value) -> String {
    let app = Router::new().route(
        "/v1beta/models/:call",
        post(move |Json(_body): Json<Value>| {
            let reply = reply.clone();
            async move { (status, Json(reply)) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1beta", addr)
}

fn envelope(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

async fn run_blocking(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ============================================================================
// render
// ============================================================================

#[test]
fn test_render_json_round_trips_report() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path())
        .args(["render", "--input"])
        .arg(fixture_path())
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["budgetRecommendation"]["userBudget"], "15000");
    assert_eq!(value["competitorAnalysis"][0]["name"], "Blue Tokai");
}

#[test]
fn test_render_text_when_piped() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path())
        .args(["render", "--input"])
        .arg(fixture_path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.starts_with("META ADS EXPERT REPORT"));
    assert!(text.contains("Your Monthly Budget: ₹15,000"));
    assert!(text.contains("  | Location: Bengaluru, India (+15 km)"));
    assert!(!text.contains("\u{1b}["), "no escape codes when piped");
}

#[test]
fn test_render_markdown() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path())
        .args(["render", "--format", "markdown", "--input"])
        .arg(fixture_path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("## Competitor Analysis"));
}

#[test]
fn test_render_exports_to_out_dir() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out");
    let output = adsctl(home.path())
        .args(["render", "--csv", "--pdf", "--input"])
        .arg(fixture_path())
        .arg("--out-dir")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let csv = fs::read_to_string(out.join("meta-ads-expert-report.csv")).unwrap();
    assert!(csv.starts_with("Section,Category,Detail,Reasoning\n"));
    assert!(csv.contains("\"Highlight single-estate \"\"farm to cup\"\" sourcing"));
    let pdf = fs::read(out.join("meta-ads-expert-report.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn test_render_rejects_incomplete_report() {
    let home = TempDir::new().unwrap();
    let mut value: Value = serde_json::from_str(&fixture_text()).unwrap();
    value.as_object_mut().unwrap().remove("expertRecommendations");
    let input = home.path().join("partial.json");
    fs::write(&input, value.to_string()).unwrap();

    let output = adsctl(home.path())
        .args(["render", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(65));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_render_missing_file_is_general_error() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path())
        .args(["render", "--input"])
        .arg(home.path().join("nope.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read"));
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_generate_blank_field_is_invalid_input() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path())
        .args(["generate", "--product", "Coffee", "--location", "  ", "--budget", "15000"])
        .env(KEY_ENV, "k")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("required fields are empty: location"));
}

#[test]
fn test_generate_without_api_key_is_config_error() {
    let home = TempDir::new().unwrap();
    // Unroutable endpoint: the request must fail before any network call
    write_config(home.path(), "http://127.0.0.1:9/v1beta");

    let output = adsctl(home.path())
        .args(["generate", "--product", "Coffee", "--location", "Bengaluru", "--budget", "15000"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(78));
    let err = stderr(&output);
    assert!(err.contains("An error occurred while generating the report."));
    assert!(!err.contains(KEY_ENV), "technical detail stays in the log");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_generate_against_local_api() {
    let home = TempDir::new().unwrap();
    let endpoint = spawn_mock(StatusCode::OK, envelope(&fixture_text())).await;
    write_config(home.path(), &endpoint);

    let mut cmd = adsctl(home.path());
    cmd.args([
        "generate",
        "--product",
        "Organic Coffee Beans",
        "--location",
        "Bengaluru, India",
        "--budget",
        "15000",
        "--format",
        "json",
        "--csv",
    ])
    .env(KEY_ENV, "test-key");
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["productCategory"], "Food & Beverage / Specialty Coffee");
    assert!(home
        .path()
        .join("exports/meta-ads-expert-report.csv")
        .exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_generate_malformed_output_exit_code() {
    let home = TempDir::new().unwrap();
    let endpoint = spawn_mock(StatusCode::OK, envelope("Here is your strategy!")).await;
    write_config(home.path(), &endpoint);

    let mut cmd = adsctl(home.path());
    cmd.args(["generate", "--product", "Coffee", "--location", "Bengaluru", "--budget", "15000"])
        .env(KEY_ENV, "test-key");
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(65));
    assert!(stdout(&output).is_empty());
    assert!(!stderr(&output).contains("Here is your strategy!"));

    let log = fs::read_to_string(home.path().join("state/meta-ads-expert/adsctl.log")).unwrap();
    assert!(log.contains("Here is your strategy!"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unwritable_log_file_falls_back_to_stderr() {
    let home = TempDir::new().unwrap();
    let endpoint = spawn_mock(StatusCode::OK, envelope("Here is your strategy!")).await;
    write_config(home.path(), &endpoint);
    let blocker = home.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let mut cmd = adsctl(home.path());
    cmd.args(["generate", "--product", "Coffee", "--location", "Bengaluru", "--budget", "15000"])
        .env(KEY_ENV, "test-key")
        .env("ADSCTL_LOG_FILE", blocker.join("adsctl.log"));
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(65));
    let err = stderr(&output);
    assert!(err.contains("Cannot open log file"));
    assert!(err.contains("Here is your strategy!"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_generate_server_error_exit_code() {
    let home = TempDir::new().unwrap();
    let endpoint = spawn_mock(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": { "code": 503, "message": "overloaded" } }),
    )
    .await;
    write_config(home.path(), &endpoint);

    let mut cmd = adsctl(home.path());
    cmd.args(["generate", "--product", "Coffee", "--location", "Bengaluru", "--budget", "15000"])
        .env(KEY_ENV, "test-key");
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(70));
}

// ============================================================================
// prompt / schema / config
// ============================================================================

#[test]
fn test_prompt_embeds_inputs_verbatim() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path())
        .args([
            "prompt",
            "--product",
            "  Organic Coffee Beans ",
            "--location",
            "Bengaluru, India",
            "--budget",
            "15000",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Product/Service: \"  Organic Coffee Beans \""));
    assert!(text.contains("Their Monthly Budget: \"15000 INR\""));
}

#[test]
fn test_prompt_blank_budget_is_invalid_input() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path())
        .args(["prompt", "--product", "Coffee", "--location", "Bengaluru", "--budget", ""])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_schema_is_json() {
    let home = TempDir::new().unwrap();
    let output = adsctl(home.path()).arg("schema").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let schema: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(schema["type"], "OBJECT");
    let required = schema["required"].as_array().unwrap();
    assert!(required.contains(&json!("copyPasteTargeting")));
}

#[test]
fn test_config_shows_defaults_then_init_writes_file() {
    let home = TempDir::new().unwrap();

    let output = adsctl(home.path()).arg("config").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("model = \"gemini-2.5-flash\""));
    assert!(!home.path().join("config.toml").exists());

    let output = adsctl(home.path()).args(["config", "--init"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let written = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("api_key_env = \"API_KEY\""));
}

#[test]
fn test_invocation_is_logged() {
    let home = TempDir::new().unwrap();
    adsctl(home.path()).arg("schema").output().unwrap();

    let log = fs::read_to_string(home.path().join("state/meta-ads-expert/adsctl.jsonl")).unwrap();
    let entry: Value = serde_json::from_str(log.lines().last().unwrap()).unwrap();
    assert_eq!(entry["command"], "schema");
    assert_eq!(entry["exit_code"], 0);
    assert_eq!(entry["ok"], true);
}
