//
//  bitbucket-api
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `bb-api` command isolated from the caller's environment and settings.
fn bb_api(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bb-api").unwrap();
    for var in [
        "BB_API_BASE_URL",
        "BB_API_TOKEN",
        "BB_API_USERNAME",
        "BB_API_APP_PASSWORD",
        "BB_API_CONFIG",
        "BB_API_DEBUG",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("bb-api version {}", bitbucket_api::VERSION)));
}

#[test]
fn test_commit_view_prints_entity() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/repositories/acme/rocket/commit/7d8f2a1c")
        .with_status(200)
        .with_body(r#"{"type": "commit", "hash": "7d8f2a1c", "message": "Fix login"}"#)
        .create();

    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .args(["commit", "view", "acme/rocket", "7d8f2a1c", "--base-url", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""hash": "7d8f2a1c""#))
        .stdout(predicate::str::contains(r#""type": "commit""#));
}

#[test]
fn test_not_found_exit_code() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/repositories/acme/rocket/commit/missing")
        .with_status(404)
        .with_body(r#"{"type": "error", "error": {"message": "Commit not found"}}"#)
        .create();

    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .args(["commit", "view", "acme/rocket", "missing", "--base-url", &server.url()])
        .assert()
        .code(bitbucket_api::exit_codes::NOT_FOUND)
        .stderr(predicate::str::contains("Commit not found"));
}

#[test]
fn test_undocumented_status_exit_code() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/repositories/acme/rocket/commit/abc")
        .with_status(503)
        .with_body("upstream unavailable")
        .create();

    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .args(["commit", "view", "acme/rocket", "abc", "--base-url", &server.url()])
        .assert()
        .code(bitbucket_api::exit_codes::UNEXPECTED_STATUS)
        .stderr(predicate::str::contains("503"))
        .stderr(predicate::str::contains("upstream unavailable"));
}

#[test]
fn test_diff_is_written_unchanged() {
    let mut server = Server::new();
    let patch = "--- a/README.md\n+++ b/README.md\n@@ -1 +1 @@\n-old\n+new\n";
    let _mock = server
        .mock("GET", "/repositories/acme/rocket/diff/abc")
        .match_query(mockito::Matcher::UrlEncoded("context".into(), "1".into()))
        .with_status(200)
        .with_body(patch)
        .create();

    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .args(["commit", "diff", "acme/rocket", "abc", "-U", "1", "--base-url", &server.url()])
        .assert()
        .success()
        .stdout(predicate::eq(patch));
}

#[test]
fn test_request_sends_token() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer from-env")
        .with_status(200)
        .with_body(r#"{"type": "user", "display_name": "Ada"}"#)
        .create();

    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .env("BB_API_TOKEN", "from-env")
        .args(["request", "/user", "--base-url", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada"));
}

#[test]
fn test_repo_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .args(["repo", "delete", "acme/old", "--token", "t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_merge_requires_credentials() {
    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .args(["pr", "merge", "acme/rocket", "7", "--base-url", "http://127.0.0.1:9"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_repo_argument() {
    let dir = TempDir::new().unwrap();
    bb_api(&dir)
        .args(["commit", "view", "acme", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WORKSPACE/REPO"));
}
