//
//  bitbucket-api
//  tests/client_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Client behaviour against a mock server: headers, credentials, the
//! envelope and strict mode.

use std::time::Duration;

use bitbucket_api::api::cloud::repositories::GetRepository;
use bitbucket_api::api::cloud::users::GetCurrentUser;
use bitbucket_api::api::cloud::workspaces::ListWorkspaces;
use bitbucket_api::api::common::NextPage;
use bitbucket_api::api::{ApiError, Client, Outcome, RawRequest};
use bitbucket_api::auth::AuthCredential;
use mockito::Matcher;
use reqwest::{Method, StatusCode};
use serde_json::json;

fn client(server: &mockito::ServerGuard) -> Client {
    Client::new(&server.url()).unwrap()
}

#[tokio::test]
async fn test_bearer_token_and_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer secret-token")
        .match_header("user-agent", Matcher::Regex(r"^bb-api/\d+\.\d+\.\d+$".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type": "user", "nickname": "jdoe", "uuid": "{1234}"}"#)
        .create_async()
        .await;

    let client = client(&server).with_auth(AuthCredential::bearer("secret-token"));
    let user = client.send_detailed(&GetCurrentUser).await.unwrap().into_result().unwrap();

    assert_eq!(user.name(), "jdoe");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_custom_token_header_without_prefix() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("x-api-key", "abc")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let credential = AuthCredential::token("abc", "", "X-Api-Key");
    let client = client(&server).with_auth(credential);
    let response = client.send_detailed(&GetCurrentUser).await.unwrap();

    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_app_password_uses_basic_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "Basic amRvZTpzZWNyZXQ=")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client(&server).with_auth(AuthCredential::app_password("jdoe", "secret"));
    client.send_detailed(&GetCurrentUser).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_configured_headers_and_cookies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("x-trace", "42")
        .match_header("cookie", "a=1; b=2")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client(&server)
        .with_headers([("X-Trace", "42")])
        .with_cookies([("b", "2"), ("a", "1")])
        .with_timeout(Duration::from_secs(5));
    client.send_detailed(&GetCurrentUser).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_envelope_keeps_raw_response() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"{"type": "repository", "full_name": "ws/repo", "new_field": [1, 2]}"#;
    server
        .mock("GET", "/repositories/ws/repo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("x-request-id", "req-1")
        .with_body(body)
        .create_async()
        .await;

    let response = client(&server)
        .send_detailed(&GetRepository::new("ws", "repo"))
        .await
        .unwrap();

    assert_eq!(response.status_code, StatusCode::OK);
    assert_eq!(response.content, body.as_bytes());
    assert_eq!(response.header("x-request-id"), Some("req-1"));

    let repo = response.into_result().unwrap();
    assert_eq!(repo.full_name.as_deref(), Some("ws/repo"));
    assert_eq!(repo.additional_properties["new_field"], json!([1, 2]));
}

#[tokio::test]
async fn test_documented_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repositories/ws/missing")
        .with_status(404)
        .with_body(r#"{"type": "error", "error": {"message": "Repository ws/missing not found"}}"#)
        .create_async()
        .await;

    let client = client(&server);
    let outcome = client
        .send(&GetRepository::new("ws", "missing"))
        .await
        .unwrap()
        .unwrap();

    match &outcome {
        Outcome::Failure { status, error } => {
            assert_eq!(*status, StatusCode::NOT_FOUND);
            assert_eq!(error.message(), "Repository ws/missing not found");
        }
        Outcome::Success(_) => panic!("expected a failure"),
    }
    assert!(matches!(outcome.into_result(), Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_undocumented_status_is_none_by_default() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repositories/ws/repo")
        .with_status(418)
        .with_body("teapot")
        .create_async()
        .await;

    let response = client(&server)
        .send_detailed(&GetRepository::new("ws", "repo"))
        .await
        .unwrap();

    assert_eq!(response.status_code.as_u16(), 418);
    assert!(response.parsed.is_none());
    assert_eq!(response.text(), "teapot");
    assert!(matches!(
        response.into_result(),
        Err(ApiError::UnexpectedStatus { .. })
    ));
}

#[tokio::test]
async fn test_strict_mode_raises_on_undocumented_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repositories/ws/repo")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client(&server).with_raise_on_unexpected_status(true);
    let err = client
        .send_detailed(&GetRepository::new("ws", "repo"))
        .await
        .unwrap_err();

    match err {
        ApiError::UnexpectedStatus { status, content } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(content, b"boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_next_page_uses_absolute_url() {
    let mut server = mockito::Server::new_async().await;
    let next = format!("{}/workspaces?page=2", server.url());
    server
        .mock("GET", "/workspaces")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body(json!({"values": [{"slug": "one"}], "next": next}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/workspaces")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"values": [{"slug": "two"}], "page": 2}"#)
        .create_async()
        .await;

    let client = client(&server).with_auth(AuthCredential::bearer("t"));
    let first = client
        .send_detailed(&ListWorkspaces::new())
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert!(first.has_next());

    let request = NextPage::from_page(&first).unwrap();
    let second = client.send_detailed(&request).await.unwrap().into_result().unwrap();

    assert_eq!(second.values[0].slug.as_deref(), Some("two"));
    assert!(!second.has_next());
}

#[tokio::test]
async fn test_raw_request_passthrough() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/repositories/ws/repo/issues")
        .match_query(Matcher::UrlEncoded("fields".into(), "id".into()))
        .match_body(Matcher::Json(json!({"title": "Bug"})))
        .with_status(201)
        .with_body(r#"{"id": 7}"#)
        .create_async()
        .await;

    let request = RawRequest::new(Method::POST, "repositories/ws/repo/issues")
        .with_query("fields", "id")
        .with_body(bitbucket_api::api::RequestBody::Json(json!({"title": "Bug"})));
    let response = client(&server).send_detailed(&request).await.unwrap();

    assert_eq!(response.status_code, StatusCode::CREATED);
    assert_eq!(response.parsed, Some(json!({"id": 7})));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_redirect_is_returned_by_default() {
    let mut server = mockito::Server::new_async().await;
    let target = format!("{}/elsewhere", server.url());
    server
        .mock("GET", "/user")
        .with_status(302)
        .with_header("location", &target)
        .create_async()
        .await;
    let followed = server
        .mock("GET", "/elsewhere")
        .with_status(200)
        .with_body("{}")
        .expect(0)
        .create_async()
        .await;

    let response = client(&server).send_detailed(&GetCurrentUser).await.unwrap();

    assert_eq!(response.status_code, StatusCode::FOUND);
    assert!(response.parsed.is_none());
    assert_eq!(response.header("location"), Some(target.as_str()));
    followed.assert_async().await;
}

#[tokio::test]
async fn test_redirect_followed_when_enabled() {
    let mut server = mockito::Server::new_async().await;
    let target = format!("{}/elsewhere", server.url());
    server
        .mock("GET", "/user")
        .with_status(302)
        .with_header("location", &target)
        .create_async()
        .await;
    let followed = server
        .mock("GET", "/elsewhere")
        .with_status(200)
        .with_body(r#"{"type": "user", "nickname": "jdoe"}"#)
        .create_async()
        .await;

    let client = client(&server).with_follow_redirects(true);
    let user = client.send_detailed(&GetCurrentUser).await.unwrap().into_result().unwrap();

    assert_eq!(user.name(), "jdoe");
    followed.assert_async().await;
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    // Accepts connections and never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let stalled = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = Client::new(&format!("http://{}", addr))
        .unwrap()
        .with_timeout(Duration::from_millis(200));
    let err = client.send_detailed(&GetCurrentUser).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(ref e) if e.is_timeout()));
    stalled.abort();
}

#[test]
fn test_async_call_from_sync_code() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/user")
        .with_status(401)
        .with_body(r#"{"type": "error", "error": {"message": "Invalid token"}}"#)
        .create();

    let client = Client::new(&server.url()).unwrap();
    let outcome = tokio_test::block_on(client.send(&GetCurrentUser))
        .unwrap()
        .unwrap();

    assert_eq!(outcome.error_message(), Some("Invalid token"));
    assert!(matches!(outcome.into_result(), Err(ApiError::AuthFailed(_))));
}
