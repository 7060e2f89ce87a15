//
//  bitbucket-api
//  tests/cli_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end tests for the `bb-api` binary.

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with an isolated config file and no ambient credentials.
fn bb(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bb-api").unwrap();
    cmd.env("BB_API_CONFIG", config_dir.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("BB_TOKEN")
        .env_remove("BB_WORKSPACE")
        .env_remove("BB_API_BASE_URL")
        .env_remove("BB_DEBUG");
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    bb(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage pull requests"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    bb(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bb-api version "));
}

#[test]
fn test_unknown_command_is_usage_error() {
    let dir = TempDir::new().unwrap();
    bb(&dir).arg("frobnicate").assert().code(2);
}

#[test]
fn test_config_path_honours_env() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.toml");
    bb(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().as_ref()));
}

#[test]
fn test_config_set_get_list() {
    let dir = TempDir::new().unwrap();

    bb(&dir)
        .args(["config", "set", "defaults.workspace", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set defaults.workspace to acme"));
    bb(&dir)
        .args(["config", "set", "client.headers.X-Trace", "on"])
        .assert()
        .success();

    bb(&dir)
        .args(["config", "get", "defaults.workspace"])
        .assert()
        .success()
        .stdout("acme\n");

    bb(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults.workspace=acme"))
        .stdout(predicate::str::contains("client.headers.X-Trace=on"));

    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("workspace = \"acme\""));
}

#[test]
fn test_config_list_json() {
    let dir = TempDir::new().unwrap();
    bb(&dir)
        .args(["config", "set", "client.timeout_secs", "12"])
        .assert()
        .success();

    let output = bb(&dir)
        .args(["config", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let values: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(values["client.timeout_secs"], "12");
    assert_eq!(values["client.verify_ssl"], "true");
}

#[test]
fn test_config_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    bb(&dir)
        .args(["config", "set", "no.such.key", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
    bb(&dir)
        .args(["config", "set", "client.verify_ssl", "maybe"])
        .assert()
        .failure();
    bb(&dir)
        .args(["config", "get", "defaults.user"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No value set"));
}

#[test]
fn test_api_get_with_fields() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/repositories/ws/repo/issues")
        .match_header("authorization", "Bearer t0k")
        .match_header("x-debug", "1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("pagelen".into(), "5".into()),
            Matcher::UrlEncoded("q".into(), "state=\"new\"".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"values": [{"id": 1}], "pagelen": 5}"#)
        .create();

    bb(&dir)
        .args(["--base-url", &server.url(), "--token", "t0k"])
        .args(["api", "repositories/ws/repo/issues", "-F", "pagelen=5"])
        .args(["--raw-field", "q=state=\"new\"", "-H", "X-Debug: 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pagelen\": 5"));
    mock.assert();
}

#[test]
fn test_api_post_json_fields() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/repositories/ws/repo/issues")
        .match_body(Matcher::Json(serde_json::json!({
            "title": "Bug",
            "content": {"raw": "It broke"},
            "votes": 3
        })))
        .with_status(201)
        .with_body(r#"{"id": 42}"#)
        .create();

    bb(&dir)
        .args(["--base-url", &server.url(), "--token", "t"])
        .args(["api", "-X", "POST", "/repositories/ws/repo/issues"])
        .args(["-F", "title=Bug", "-F", "content.raw=It broke", "-F", "votes=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 42"));
    mock.assert();
}

#[test]
fn test_api_not_found_exit_code() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/repositories/ws/missing")
        .with_status(404)
        .with_body(r#"{"type": "error", "error": {"message": "Repository ws/missing not found"}}"#)
        .create();

    bb(&dir)
        .args(["--base-url", &server.url(), "--token", "t"])
        .args(["api", "repositories/ws/missing", "--silent"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Repository ws/missing not found"));
}

#[test]
fn test_api_paginate_combines_values() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let next = format!("{}/workspaces?page=2", server.url());
    server
        .mock("GET", "/workspaces")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body(serde_json::json!({"values": [{"slug": "a"}], "next": next}).to_string())
        .create();
    server
        .mock("GET", "/workspaces")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"values": [{"slug": "b"}]}"#)
        .create();

    let output = bb(&dir)
        .args(["--base-url", &server.url(), "--token", "t"])
        .args(["api", "workspaces", "--paginate"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let values: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(values, serde_json::json!([{"slug": "a"}, {"slug": "b"}]));
}

#[test]
fn test_repo_view_json() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/repositories/ws/repo")
        .with_status(200)
        .with_body(r#"{"full_name": "ws/repo", "language": "rust", "is_private": false}"#)
        .create();

    let output = bb(&dir)
        .args(["--base-url", &server.url(), "--token", "t", "--json"])
        .args(["repo", "view", "ws/repo"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let repo: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(repo["full_name"], "ws/repo");
    assert_eq!(repo["language"], "rust");
}

#[test]
fn test_repo_view_uses_default_workspace() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/repositories/acme/widgets")
        .with_status(200)
        .with_body(r#"{"full_name": "acme/widgets"}"#)
        .create();

    bb(&dir)
        .args(["config", "set", "defaults.workspace", "acme"])
        .assert()
        .success();
    bb(&dir)
        .args(["--base-url", &server.url(), "--token", "t"])
        .args(["repo", "view", "widgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/widgets"));
    mock.assert();
}

#[test]
fn test_authenticated_command_without_credentials() {
    let dir = TempDir::new().unwrap();
    bb(&dir)
        .args(["--base-url", "http://127.0.0.1:9"])
        .args(["--token", " ", "workspace", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Authentication required"));
}
