//
//  bitbucket-api
//  api/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request endpoints.
//!
//! # Merging
//!
//! A merge either completes in the request (200) or, for large repositories
//! or when `async` is requested, is queued (202). Queued merges are followed
//! with [`GetMergeTaskStatus`]:
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::pullrequests::{GetMergeTaskStatus, MergePullRequest};
//! use bitbucket_api::api::Client;
//! use bitbucket_api::models::{MergeParameters, MergeStrategy, PullRequestMerge};
//!
//! # async fn example() -> bitbucket_api::api::common::Result<()> {
//! let client = Client::cloud()?;
//! let merge = MergePullRequest::new("ws", "repo", 42).parameters(MergeParameters {
//!     merge_strategy: Some(MergeStrategy::Squash),
//!     close_source_branch: Some(true),
//!     ..MergeParameters::default()
//! });
//!
//! match client.send_detailed(&merge).await?.into_result()? {
//!     PullRequestMerge::Merged(pr) => println!("merged #{}", pr.id.unwrap_or_default()),
//!     PullRequestMerge::Queued(task) => {
//!         if let Some(url) = task.poll_url() {
//!             let status = client
//!                 .send_detailed(&GetMergeTaskStatus::from_url(url))
//!                 .await?
//!                 .into_result()?;
//!             println!("merge task: {:?}", status.task_status);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Status 555 is Bitbucket's "the merge or decline timed out" code. It comes
//! with the usual error body.

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{decode, ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, repo_path, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::{
    Commit, CommitStatus, MergeParameters, MergeTaskStatus, Participant, PullRequest,
    PullRequestComment, PullRequestMerge, PullRequestState,
};

fn pullrequest_path(workspace: &str, repo_slug: &str, id: u64) -> String {
    format!("{}/pullrequests/{}", repo_path(workspace, repo_slug), id)
}

/// `GET /repositories/{workspace}/{repo_slug}/pullrequests`
///
/// Bitbucket only returns open pull requests unless `state` says otherwise.
#[derive(Debug, Clone)]
pub struct ListPullRequests {
    pub workspace: String,
    pub repo_slug: String,
    /// Sent as one `state` parameter per value.
    pub states: Vec<PullRequestState>,
    pub options: ListOptions,
}

impl ListPullRequests {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            states: Vec::new(),
            options: ListOptions::default(),
        }
    }

    /// Adds a state to filter on.
    pub fn state(mut self, state: PullRequestState) -> Self {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListPullRequests {
    type Output = Outcome<Paginated<PullRequest>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/pullrequests", repo_path(&self.workspace, &self.repo_slug))
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_all("state", &self.states);
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/pullrequests/{id}`
#[derive(Debug, Clone)]
pub struct GetPullRequest {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl GetPullRequest {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for GetPullRequest {
    type Output = Outcome<PullRequest>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        pullrequest_path(&self.workspace, &self.repo_slug, self.id)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            400 | 401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/pullrequests`
#[derive(Debug, Clone)]
pub struct CreatePullRequest {
    pub workspace: String,
    pub repo_slug: String,
    pub body: PullRequest,
}

impl CreatePullRequest {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        body: PullRequest,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }
}

impl Endpoint for CreatePullRequest {
    type Output = Outcome<PullRequest>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("{}/pullrequests", repo_path(&self.workspace, &self.repo_slug))
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            400 | 401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `PUT /repositories/{workspace}/{repo_slug}/pullrequests/{id}`
#[derive(Debug, Clone)]
pub struct UpdatePullRequest {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub body: PullRequest,
}

impl UpdatePullRequest {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        id: u64,
        body: PullRequest,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            body,
        }
    }
}

impl Endpoint for UpdatePullRequest {
    type Output = Outcome<PullRequest>;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        pullrequest_path(&self.workspace, &self.repo_slug, self.id)
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            400 | 401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/pullrequests/{id}/merge`
#[derive(Debug, Clone)]
pub struct MergePullRequest {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    /// Ask Bitbucket to queue the merge and answer 202 straight away.
    pub async_merge: Option<bool>,
    pub parameters: Option<MergeParameters>,
}

impl MergePullRequest {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            async_merge: None,
            parameters: None,
        }
    }

    pub fn async_merge(mut self, async_merge: bool) -> Self {
        self.async_merge = Some(async_merge);
        self
    }

    pub fn parameters(mut self, parameters: MergeParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl Endpoint for MergePullRequest {
    type Output = Outcome<PullRequestMerge>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/merge",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("async", self.async_merge);
        params
    }

    fn body(&self) -> Result<RequestBody> {
        match &self.parameters {
            Some(parameters) => RequestBody::json(parameters),
            None => Ok(RequestBody::Empty),
        }
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => Ok(Some(Outcome::Success(PullRequestMerge::Merged(decode(
                content,
            )?)))),
            202 => Ok(Some(Outcome::Success(PullRequestMerge::Queued(decode(
                content,
            )?)))),
            555 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/pullrequests/{id}/merge/task-status/{task_id}`
#[derive(Debug, Clone)]
pub struct GetMergeTaskStatus {
    url: String,
}

impl GetMergeTaskStatus {
    pub fn new(
        workspace: &str,
        repo_slug: &str,
        id: u64,
        task_id: &str,
    ) -> Self {
        Self {
            url: format!(
                "{}/merge/task-status/{}",
                pullrequest_path(workspace, repo_slug, id),
                encode_segment(task_id)
            ),
        }
    }

    /// Uses the `self` link of a queued [`MergeTaskStatus`].
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Endpoint for GetMergeTaskStatus {
    type Output = Outcome<MergeTaskStatus>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        self.url.clone()
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            400 | 403 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/pullrequests/{id}/decline`
#[derive(Debug, Clone)]
pub struct DeclinePullRequest {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl DeclinePullRequest {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for DeclinePullRequest {
    type Output = Outcome<PullRequest>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/decline",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            555 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/pullrequests/{id}/approve`
#[derive(Debug, Clone)]
pub struct ApprovePullRequest {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl ApprovePullRequest {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for ApprovePullRequest {
    type Output = Outcome<Participant>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/approve",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /repositories/{workspace}/{repo_slug}/pullrequests/{id}/approve`
#[derive(Debug, Clone)]
pub struct UnapprovePullRequest {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl UnapprovePullRequest {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for UnapprovePullRequest {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!(
            "{}/approve",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/pullrequests/{id}/request-changes`
#[derive(Debug, Clone)]
pub struct RequestChanges {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl RequestChanges {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for RequestChanges {
    type Output = Outcome<Participant>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/request-changes",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            400 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/pullrequests/{id}/comments`
#[derive(Debug, Clone)]
pub struct ListPullRequestComments {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub options: ListOptions,
}

impl ListPullRequestComments {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListPullRequestComments {
    type Output = Outcome<Paginated<PullRequestComment>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/comments",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/pullrequests/{id}/comments`
#[derive(Debug, Clone)]
pub struct CreatePullRequestComment {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub body: PullRequestComment,
}

impl CreatePullRequestComment {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        id: u64,
        body: PullRequestComment,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            body,
        }
    }
}

impl Endpoint for CreatePullRequestComment {
    type Output = Outcome<PullRequestComment>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/comments",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/pullrequests/{id}/commits`
#[derive(Debug, Clone)]
pub struct ListPullRequestCommits {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub options: ListOptions,
}

impl ListPullRequestCommits {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListPullRequestCommits {
    type Output = Outcome<Paginated<Commit>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/commits",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/pullrequests/{id}/statuses`
#[derive(Debug, Clone)]
pub struct ListPullRequestStatuses {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub options: ListOptions,
}

impl ListPullRequestStatuses {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListPullRequestStatuses {
    type Output = Outcome<Paginated<CommitStatus>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/statuses",
            pullrequest_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_states_are_repeated() {
        let request = ListPullRequests::new("ws", "repo")
            .state(PullRequestState::Open)
            .state(PullRequestState::Merged)
            .state(PullRequestState::Open);
        let query = request.query();
        assert_eq!(
            query.pairs(),
            &[
                ("state".to_string(), "OPEN".to_string()),
                ("state".to_string(), "MERGED".to_string()),
            ]
        );
    }

    #[test]
    fn test_merge_dispatch() {
        let request = MergePullRequest::new("ws", "repo", 7).async_merge(true);
        assert_eq!(request.path(), "/repositories/ws/repo/pullrequests/7/merge");
        assert_eq!(request.query().get("async"), Some("true"));
        assert_eq!(request.body().unwrap(), RequestBody::Empty);

        let merged = request
            .parse(StatusCode::OK, br#"{"id": 7, "state": "MERGED"}"#)
            .unwrap();
        assert!(matches!(
            merged,
            Some(Outcome::Success(PullRequestMerge::Merged(ref pr))) if pr.id == Some(7)
        ));

        let queued = request
            .parse(StatusCode::ACCEPTED, br#"{"task_status": "PENDING"}"#)
            .unwrap();
        assert!(matches!(
            queued,
            Some(Outcome::Success(PullRequestMerge::Queued(ref task)))
                if task.task_status.as_deref() == Some("PENDING")
        ));

        let timeout = request
            .parse(
                StatusCode::from_u16(555).unwrap(),
                br#"{"type": "error", "error": {"message": "Timeout"}}"#,
            )
            .unwrap()
            .unwrap();
        assert_eq!(timeout.error_message(), Some("Timeout"));
    }

    #[test]
    fn test_unapprove_no_content() {
        let request = UnapprovePullRequest::new("ws", "repo", 3);
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(
            request.parse(StatusCode::NO_CONTENT, b"").unwrap(),
            Some(Outcome::Success(()))
        );
    }

    #[test]
    fn test_merge_task_status_path() {
        let request = GetMergeTaskStatus::new("ws", "repo", 7, "abc-123");
        assert_eq!(
            request.path(),
            "/repositories/ws/repo/pullrequests/7/merge/task-status/abc-123"
        );
    }
}
