//! End-to-end tests for the `canvas` binary.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const SECRET: &str = "s3cr3t";

fn canvas_cmd() -> Command {
    let mut cmd = Command::cargo_bin("canvas").unwrap();
    for var in [
        "FACEBOOK_APP_ID",
        "FACEBOOK_SECRET",
        "FACEBOOK_NAMESPACE",
        "FACEBOOK_SCOPE",
        "CANVAS_CONFIG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn sign(user_id: &str) -> String {
    let output = canvas_cmd()
        .args(["sign", "--user-id", user_id, "--secret", SECRET])
        .output()
        .unwrap();
    assert!(output.status.success(), "sign should succeed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_sign_verify_roundtrip() {
    let token = sign("123");

    let output = canvas_cmd()
        .args(["verify", token.as_str(), "--secret", SECRET, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["user_id"], "123");
    assert_eq!(payload["algorithm"], "HMAC-SHA256");
}

#[test]
fn test_verify_summary_hides_oauth_token() {
    let dir = tempdir().unwrap();
    let payload_path = dir.path().join("payload.json");
    fs::write(
        &payload_path,
        r#"{"user_id": "7", "oauth_token": "EAAB-private", "user": {"locale": "nl_NL"}}"#,
    )
    .unwrap();

    let output = canvas_cmd()
        .args(["sign", "--secret", SECRET, "--payload"])
        .arg(&payload_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let token = String::from_utf8(output.stdout).unwrap().trim().to_string();

    canvas_cmd()
        .args(["verify", token.as_str(), "--secret", SECRET])
        .assert()
        .success()
        .stdout(predicate::str::contains("user_id:     7"))
        .stdout(predicate::str::contains("locale:      nl_NL"))
        .stdout(predicate::str::contains("(present)"))
        .stdout(predicate::str::contains("EAAB-private").not());
}

#[test]
fn test_verify_reads_secret_from_env_and_token_from_stdin() {
    let token = sign("5");

    canvas_cmd()
        .args(["verify", "-", "--json"])
        .env("FACEBOOK_SECRET", SECRET)
        .write_stdin(format!("{token}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""user_id":"5""#));
}

#[test]
fn test_wrong_secret_exit_code() {
    let token = sign("123");

    canvas_cmd()
        .args(["verify", token.as_str(), "--secret", "wrong"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("signature verification failed"));
}

#[test]
fn test_malformed_token_exit_code() {
    canvas_cmd()
        .args(["verify", "not-a-token", "--secret", SECRET])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed signed request"));
}

#[test]
fn test_unsupported_algorithm_exit_code() {
    // {"algorithm":"HMAC-SHA1"}
    canvas_cmd()
        .args([
            "verify",
            "sig.eyJhbGdvcml0aG0iOiJITUFDLVNIQTEifQ",
            "--secret",
            SECRET,
        ])
        .assert()
        .code(3);
}

#[test]
fn test_quiet_mode_suppresses_output() {
    canvas_cmd()
        .args(["verify", "not-a-token", "--secret", SECRET, "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:").not());
}

#[test]
fn test_sign_refuses_other_algorithm() {
    let dir = tempdir().unwrap();
    let payload_path = dir.path().join("payload.json");
    fs::write(&payload_path, r#"{"algorithm": "HMAC-SHA1"}"#).unwrap();

    canvas_cmd()
        .args(["sign", "--secret", SECRET, "--payload"])
        .arg(&payload_path)
        .assert()
        .code(2);
}

#[test]
fn test_login_url_from_env() {
    canvas_cmd()
        .arg("login-url")
        .env("FACEBOOK_APP_ID", "1234")
        .env("FACEBOOK_SECRET", SECRET)
        .env("FACEBOOK_NAMESPACE", "myapp")
        .env("FACEBOOK_SCOPE", "email")
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "https://www.facebook.com/dialog/oauth?client_id=1234&redirect_uri=https%3A%2F%2Fapps.facebook.com%2Fmyapp%2F&scope=email\n",
        ));
}

#[test]
fn test_login_url_missing_config() {
    canvas_cmd()
        .arg("login-url")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("FACEBOOK_SECRET"));
}

#[test]
fn test_handle_with_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("canvas.yaml");
    fs::write(
        &config_path,
        format!("app_id: \"1234\"\nsecret: {SECRET}\nnamespace: myapp\n"),
    )
    .unwrap();

    let authorized = sign("123");
    canvas_cmd()
        .args(["handle", authorized.as_str(), "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout("200\n123\n");

    let anonymous = canvas_cmd()
        .args(["sign", "--secret", SECRET])
        .output()
        .unwrap();
    let anonymous = String::from_utf8(anonymous.stdout).unwrap().trim().to_string();
    canvas_cmd()
        .args(["handle", anonymous.as_str(), "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("200\n<script> top.location.href='"));

    canvas_cmd()
        .args(["handle", "garbage", "--config"])
        .arg(&config_path)
        .assert()
        .code(1)
        .stdout("403\nforbidden\n");

    canvas_cmd()
        .args(["handle", "--config"])
        .arg(&config_path)
        .assert()
        .code(1)
        .stdout("403\nforbidden\n");
}

#[test]
fn test_sign_issued_now_stamps_current_time() {
    let output = canvas_cmd()
        .args(["sign", "--issued-now", "--secret", SECRET])
        .output()
        .unwrap();
    assert!(output.status.success());
    let token = String::from_utf8(output.stdout).unwrap().trim().to_string();

    let output = canvas_cmd()
        .args(["verify", token.as_str(), "--secret", SECRET, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    let issued_at = payload["issued_at"].as_i64().unwrap();
    let now = chrono::Utc::now().timestamp();
    assert!((now - 60..=now).contains(&issued_at), "issued_at {issued_at} not near {now}");
}

#[test]
fn test_verify_json_is_the_plain_payload_object() {
    let token = sign("9");

    canvas_cmd()
        .args(["verify", token.as_str(), "--secret", SECRET, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "{\"algorithm\":\"HMAC-SHA256\",\"user_id\":\"9\"}\n",
        ));
}
