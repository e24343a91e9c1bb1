//! Integration tests for the `vouchly` CLI binary.
//!
//! Argument parsing, help and completions run without a backend; the
//! API-bound commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vouchly` binary with env isolation.
///
/// Clears all `VOUCHLY_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn vouchly_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vouchly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("VOUCHLY_PROFILE")
        .env_remove("VOUCHLY_API_URL")
        .env_remove("VOUCHLY_OUTPUT")
        .env_remove("VOUCHLY_INSECURE")
        .env_remove("VOUCHLY_TIMEOUT");
    cmd
}

/// Run the command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn campaign_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "prefix": "SUMMER",
        "amount": 25,
        "currency": "EUR",
        "validFrom": "2025-06-01",
        "validTo": "2025-09-01",
        "createdAt": "2025-05-01T10:00:00.000Z",
        "updatedAt": "2025-05-01T10:00:00.000Z"
    })
}

fn voucher_json(id: i64, campaign_id: i64) -> Value {
    json!({
        "id": id,
        "campaignId": campaign_id,
        "code": format!("SUMMER-{id:06}"),
        "isUsed": false,
        "createdAt": "2025-06-01T10:00:00.000Z",
        "updatedAt": "2025-06-01T10:00:00.000Z"
    })
}

async fn mount_campaign(server: &MockServer, id: i64, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/campaigns/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(campaign_json(id, name)))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = vouchly_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    vouchly_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("voucher campaigns")
            .and(predicate::str::contains("campaigns"))
            .and(predicate::str::contains("vouchers"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    vouchly_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vouchly"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    vouchly_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    vouchly_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_page_is_rejected_by_clap() {
    let home = tempfile::tempdir().unwrap();
    let output = vouchly_cmd(home.path())
        .args(["campaigns", "list", "--page", "0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_lives_under_config_home() {
    let home = tempfile::tempdir().unwrap();
    vouchly_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vouchly").and(predicate::str::ends_with("config.toml\n")));
}

#[test]
fn test_config_init_writes_profile() {
    let home = tempfile::tempdir().unwrap();
    vouchly_cmd(home.path())
        .args(["--api-url", "http://vouchers.test:3000", "config", "init"])
        .assert()
        .success();

    let path_output = vouchly_cmd(home.path()).args(["config", "path"]).output().unwrap();
    let config_path = String::from_utf8(path_output.stdout).unwrap();
    let written = std::fs::read_to_string(config_path.trim()).unwrap();
    assert!(
        written.contains(r#"api_url = "http://vouchers.test:3000""#),
        "unexpected config:\n{written}"
    );

    vouchly_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("default *\n");
}

#[test]
fn test_config_use_unknown_profile_fails() {
    let home = tempfile::tempdir().unwrap();
    vouchly_cmd(home.path())
        .args(["config", "use", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile 'staging' not found"));
}

// ── Campaigns ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_campaigns_list_renders_table_and_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [campaign_json(1, "Summer Sale")],
            "total": 1,
            "page": 1,
            "limit": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["--api-url", &server.uri(), "campaigns", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Summer Sale"), "{stdout}");
    assert!(stdout.contains("25 EUR"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Showing 1 to 1 of 1 campaigns"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_campaigns_list_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [], "total": 0, "page": 1, "limit": 20
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "campaigns", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "No campaigns found. Create your first campaign to get started!\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_campaigns_list_plain_output_is_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [campaign_json(3, "A"), campaign_json(4, "B")],
            "total": 2, "page": 1, "limit": 20
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "-o", "plain", "campaigns", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "3\n4\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_campaigns_get_not_found_exits_4() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "campaigns", "get", "99"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("API Error: 404 Not Found"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_campaigns_create_validation_never_reaches_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args([
        "-u",
        &server.uri(),
        "campaigns",
        "create",
        "--amount",
        "0",
        "--valid-from",
        "2025-06-01",
        "--valid-to",
        "2025-06-01",
    ]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Amount must be greater than 0"), "{text}");
    assert!(text.contains("Valid to date must be after valid from date"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_campaigns_create_posts_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/campaigns"))
        .and(wiremock::matchers::body_json(json!({
            "name": "Winter",
            "prefix": "DISCOUNT",
            "amount": 100.0,
            "currency": "EUR",
            "validFrom": "2025-01-01",
            "validTo": "2026-01-01"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(campaign_json(8, "Winter")))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "-o", "json", "campaigns", "create", "--name", "Winter"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let created: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(created["id"], 8);
    assert_eq!(created["name"], "Winter");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_campaigns_delete_requires_yes_without_tty() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/campaigns/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "campaigns", "delete", "3"]);
    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("requires confirmation"));

    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "campaigns", "delete", "3", "--yes"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_api_exits_7() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", "http://127.0.0.1:9", "campaigns", "list"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("Could not connect"));
}

// ── Vouchers ────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_vouchers_list_shows_range_and_page() {
    let server = MockServer::start().await;
    mount_campaign(&server, 4, "Summer").await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [voucher_json(21, 4)],
            "pagination": { "total": 45, "page": 2, "pages": 3, "limit": 20 }
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "vouchers", "list", "4", "--page", "2"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SUMMER-000021"), "{stdout}");
    assert!(stdout.contains("Available"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Summer - 45 vouchers"), "{stderr}");
    assert!(stderr.contains("Showing 21 to 40 of 45 vouchers"), "{stderr}");
    assert!(stderr.contains("Page 2 of 3"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vouchers_generate_out_of_range_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "vouchers", "generate", "4", "--count", "100001"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Count must be between 1 and 100,000"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vouchers_generate_then_reloads() {
    let server = MockServer::start().await;
    mount_campaign(&server, 4, "Summer").await;
    Mock::given(method("POST"))
        .and(path("/api/campaigns/4/vouchers"))
        .and(wiremock::matchers::body_json(json!({ "count": 50 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "count": 50 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [voucher_json(1, 4)],
            "pagination": { "total": 50, "page": 1, "pages": 3, "limit": 20 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "vouchers", "generate", "4", "-n", "50"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Generated 50 vouchers"), "{stderr}");
    assert!(stderr.contains("Summer - 50 vouchers"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vouchers_download_saves_csv() {
    let server = MockServer::start().await;
    mount_campaign(&server, 4, "Summer").await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [voucher_json(1, 4)],
            "pagination": { "total": 1, "page": 1, "pages": 1, "limit": 20 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"code\nSUMMER-000001\n".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "vouchers", "download", "4", "--dir"])
        .arg(out_dir.path());
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let saved = out_dir.path().join("vouchers-Summer-4.csv");
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "code\nSUMMER-000001\n");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        saved.display().to_string()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vouchers_download_without_vouchers_fails() {
    let server = MockServer::start().await;
    mount_campaign(&server, 4, "Summer").await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "pagination": { "total": 0, "page": 1, "pages": 0, "limit": 20 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers/download"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let mut cmd = vouchly_cmd(home.path());
    cmd.args(["-u", &server.uri(), "vouchers", "download", "4", "--dir"])
        .arg(out_dir.path());
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("has no vouchers to download"));
}
