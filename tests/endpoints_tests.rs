//
//  bitbucket-api
//  tests/endpoints_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Endpoint requests and status dispatch over real HTTP.

use bitbucket_api::api::cloud::downloads::UploadDownload;
use bitbucket_api::api::cloud::issues::{CreateIssue, DeleteIssue, ListIssues};
use bitbucket_api::api::cloud::pipelines::GetPipelineStepLog;
use bitbucket_api::api::cloud::pullrequests::{
    CreatePullRequest, ListPullRequests, MergePullRequest,
};
use bitbucket_api::api::{ApiError, Client, File, ListOptions, Outcome};
use bitbucket_api::models::{
    Issue, IssueKind, IssueState, MergeParameters, MergeStrategy, PullRequest, PullRequestMerge,
    PullRequestState,
};
use mockito::Matcher;
use serde_json::json;

async fn setup() -> (mockito::ServerGuard, Client) {
    let server = mockito::Server::new_async().await;
    let client = Client::new(&server.url()).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_list_pull_requests_repeats_state() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("GET", "/repositories/ws/repo/pullrequests")
        .match_query(Matcher::Exact("state=OPEN&state=MERGED&pagelen=10".into()))
        .with_status(200)
        .with_body(
            json!({
                "values": [{"id": 1, "title": "First", "state": "MERGED"}],
                "pagelen": 10
            })
            .to_string(),
        )
        .create_async()
        .await;

    let request = ListPullRequests::new("ws", "repo")
        .state(PullRequestState::Open)
        .state(PullRequestState::Merged)
        .options(ListOptions::new().pagelen(10));
    let page = client.send_detailed(&request).await.unwrap().into_result().unwrap();

    assert_eq!(page.values.len(), 1);
    assert_eq!(page.values[0].state, Some(PullRequestState::Merged));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_pull_request_body() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("POST", "/repositories/ws/repo/pullrequests")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "title": "Add login",
            "source": {"branch": {"name": "feature/login"}},
            "destination": {"branch": {"name": "main"}}
        })))
        .with_status(201)
        .with_body(r#"{"id": 12, "title": "Add login", "state": "OPEN"}"#)
        .create_async()
        .await;

    let body = PullRequest {
        title: Some("Add login".to_string()),
        ..PullRequest::between("feature/login", "main")
    };
    let created = client
        .send_detailed(&CreatePullRequest::new("ws", "repo", body))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(created.id, Some(12));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_issue_validation_error() {
    let (mut server, client) = setup().await;
    server
        .mock("POST", "/repositories/ws/repo/issues")
        .match_body(Matcher::PartialJson(json!({
            "title": "Crash",
            "kind": "bug",
            "content": {"raw": "Stack trace"}
        })))
        .with_status(404)
        .with_body(r#"{"type": "error", "error": {"message": "Issue tracker not enabled"}}"#)
        .create_async()
        .await;

    let issue = Issue {
        kind: Some(IssueKind::Bug),
        ..Issue::new("Crash", "Stack trace")
    };
    let outcome = client
        .send(&CreateIssue::new("ws", "repo", issue))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome.error_message(), Some("Issue tracker not enabled"));
    let err = outcome.into_result().unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref m) if m == "Issue tracker not enabled"));
}

#[tokio::test]
async fn test_list_issues_accepts_submitted_state() {
    let (mut server, client) = setup().await;
    server
        .mock("GET", "/repositories/ws/repo/issues")
        .with_status(200)
        .with_body(r#"{"values": [{"id": 1, "state": "submitted"}]}"#)
        .create_async()
        .await;

    let page = client
        .send_detailed(&ListIssues::new("ws", "repo"))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(page.values[0].state, Some(IssueState::Submitted));
}

#[tokio::test]
async fn test_delete_issue_no_content() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("DELETE", "/repositories/ws/repo/issues/3")
        .with_status(204)
        .create_async()
        .await;

    let outcome = client
        .send(&DeleteIssue::new("ws", "repo", 3))
        .await
        .unwrap();

    assert_eq!(outcome, Some(Outcome::Success(())));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_merge_completes() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("POST", "/repositories/ws/repo/pullrequests/4/merge")
        .match_body(Matcher::Json(json!({
            "merge_strategy": "squash",
            "close_source_branch": true
        })))
        .with_status(200)
        .with_body(r#"{"id": 4, "state": "MERGED"}"#)
        .create_async()
        .await;

    let parameters = MergeParameters {
        merge_strategy: Some(MergeStrategy::Squash),
        close_source_branch: Some(true),
        ..MergeParameters::default()
    };
    let merge = client
        .send_detailed(&MergePullRequest::new("ws", "repo", 4).parameters(parameters))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    match merge {
        PullRequestMerge::Merged(pr) => assert_eq!(pr.state, Some(PullRequestState::Merged)),
        PullRequestMerge::Queued(_) => panic!("expected a completed merge"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_merge_queued() {
    let (mut server, client) = setup().await;
    let poll = format!(
        "{}/repositories/ws/repo/pullrequests/4/merge/task-status/abc",
        server.url()
    );
    server
        .mock("POST", "/repositories/ws/repo/pullrequests/4/merge")
        .match_query(Matcher::UrlEncoded("async".into(), "true".into()))
        .with_status(202)
        .with_body(
            json!({
                "task_status": "PENDING",
                "links": {"self": {"href": poll}}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let merge = client
        .send_detailed(&MergePullRequest::new("ws", "repo", 4).async_merge(true))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    let PullRequestMerge::Queued(task) = merge else {
        panic!("expected a queued merge");
    };
    assert_eq!(task.task_status.as_deref(), Some("PENDING"));
    assert_eq!(task.poll_url(), Some(poll.as_str()));
}

#[tokio::test]
async fn test_step_log_bytes_and_not_modified() {
    let (mut server, client) = setup().await;
    let path = "/repositories/ws/repo/pipelines/%7Bp1%7D/steps/%7Bs1%7D/log";
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body("+ cargo test\nok\n")
        .expect(1)
        .create_async()
        .await;

    let request = GetPipelineStepLog::new("ws", "repo", "{p1}", "{s1}");
    let log = client.send_detailed(&request).await.unwrap().into_result().unwrap();
    assert_eq!(log, b"+ cargo test\nok\n".to_vec());

    server.reset_async().await;
    server
        .mock("GET", path)
        .with_status(304)
        .create_async()
        .await;

    let unchanged = client.send_detailed(&request).await.unwrap().into_result().unwrap();
    assert!(unchanged.is_empty());
}

#[tokio::test]
async fn test_upload_download_multipart() {
    let (mut server, client) = setup().await;
    let mock = server
        .mock("POST", "/repositories/ws/repo/downloads")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="files"; filename="notes.txt""#.to_string()),
            Matcher::Regex("release notes".to_string()),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let file = File::new("release notes").with_file_name("notes.txt");
    let outcome = client
        .send(&UploadDownload::new("ws", "repo", file))
        .await
        .unwrap()
        .unwrap();

    assert!(outcome.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_decode_error_on_malformed_success_body() {
    let (mut server, client) = setup().await;
    server
        .mock("GET", "/repositories/ws/repo/pullrequests")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client
        .send_detailed(&ListPullRequests::new("ws", "repo"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
