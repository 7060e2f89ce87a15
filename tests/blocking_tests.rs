//
//  bitbucket-api
//  tests/blocking_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The blocking transport. These tests stay outside any async runtime.

use bitbucket_api::api::cloud::issues::CreateIssueComment;
use bitbucket_api::api::cloud::repositories::GetRepository;
use bitbucket_api::api::cloud::users::GetCurrentUser;
use bitbucket_api::api::{ApiError, Client, Outcome};
use bitbucket_api::auth::AuthCredential;
use mockito::Matcher;
use reqwest::StatusCode;
use serde_json::json;

#[test]
fn test_blocking_detailed_response() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/repositories/ws/repo")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(r#"{"full_name": "ws/repo", "is_private": true}"#)
        .create();

    let client = Client::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::bearer("tok"));
    let response = client
        .send_blocking_detailed(&GetRepository::new("ws", "repo"))
        .unwrap();

    assert!(response.is_success());
    let repo = response.into_result().unwrap();
    assert_eq!(repo.full_name.as_deref(), Some("ws/repo"));
    assert_eq!(repo.is_private, Some(true));
    mock.assert();
}

#[test]
fn test_blocking_parsed_failure() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/repositories/ws/secret")
        .with_status(403)
        .with_body(r#"{"type": "error", "error": {"message": "Access denied"}}"#)
        .create();

    let client = Client::new(&server.url()).unwrap();
    let outcome = client
        .send_blocking(&GetRepository::new("ws", "secret"))
        .unwrap();

    let Some(Outcome::Failure { status, error }) = outcome else {
        panic!("expected a documented failure");
    };
    assert_eq!(status.as_u16(), 403);
    assert_eq!(error.message(), "Access denied");
}

#[test]
fn test_blocking_json_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/repositories/ws/repo/issues/9/comments")
        .match_body(Matcher::Json(json!({"content": {"raw": "Fixed in 1.2"}})))
        .with_status(201)
        .with_body(r#"{"id": 100, "content": {"raw": "Fixed in 1.2"}}"#)
        .create();

    let client = Client::new(&server.url()).unwrap();
    let comment = client
        .send_blocking_detailed(&CreateIssueComment::new("ws", "repo", 9, "Fixed in 1.2"))
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(comment.id, Some(100));
    mock.assert();
}

#[test]
fn test_blocking_strict_mode() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/repositories/ws/repo")
        .with_status(502)
        .with_body("bad gateway")
        .create();

    let client = Client::new(&server.url())
        .unwrap()
        .with_raise_on_unexpected_status(true);
    let err = client
        .send_blocking(&GetRepository::new("ws", "repo"))
        .unwrap_err();

    assert!(matches!(err, ApiError::UnexpectedStatus { .. }));
    assert!(err.to_string().contains("bad gateway"));
}

#[test]
fn test_blocking_connection_refused() {
    let client = Client::new("http://127.0.0.1:9").unwrap();
    let err = client
        .send_blocking(&GetRepository::new("ws", "repo"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn test_blocking_redirect_not_followed() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/user")
        .with_status(301)
        .with_header("location", "/users/jdoe")
        .create();

    let response = Client::new(&server.url())
        .unwrap()
        .send_blocking_detailed(&GetCurrentUser)
        .unwrap();

    assert_eq!(response.status_code, StatusCode::MOVED_PERMANENTLY);
    assert!(response.parsed.is_none());
}
