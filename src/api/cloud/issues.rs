//
//  bitbucket-api
//  api/cloud/issues.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue tracker endpoints.
//!
//! Repositories without an enabled tracker answer 404; repositories whose
//! tracker was moved elsewhere answer 410.

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{repo_path, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::{Issue, IssueComment};

fn issue_path(workspace: &str, repo_slug: &str, id: u64) -> String {
    format!("{}/issues/{}", repo_path(workspace, repo_slug), id)
}

/// `GET /repositories/{workspace}/{repo_slug}/issues`
#[derive(Debug, Clone)]
pub struct ListIssues {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListIssues {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListIssues {
    type Output = Outcome<Paginated<Issue>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/issues", repo_path(&self.workspace, &self.repo_slug))
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 403 | 404 | 410 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/issues/{id}`
#[derive(Debug, Clone)]
pub struct GetIssue {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl GetIssue {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for GetIssue {
    type Output = Outcome<Issue>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        issue_path(&self.workspace, &self.repo_slug, self.id)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 403 | 404 | 410 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/issues`
#[derive(Debug, Clone)]
pub struct CreateIssue {
    pub workspace: String,
    pub repo_slug: String,
    pub body: Issue,
}

impl CreateIssue {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, body: Issue) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }
}

impl Endpoint for CreateIssue {
    type Output = Outcome<Issue>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("{}/issues", repo_path(&self.workspace, &self.repo_slug))
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            401 | 403 | 404 | 410 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `PUT /repositories/{workspace}/{repo_slug}/issues/{id}`
///
/// Only the fields set on `body` are changed.
#[derive(Debug, Clone)]
pub struct UpdateIssue {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub body: Issue,
}

impl UpdateIssue {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        id: u64,
        body: Issue,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            body,
        }
    }
}

impl Endpoint for UpdateIssue {
    type Output = Outcome<Issue>;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        issue_path(&self.workspace, &self.repo_slug, self.id)
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 403 | 404 | 410 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /repositories/{workspace}/{repo_slug}/issues/{id}`
#[derive(Debug, Clone)]
pub struct DeleteIssue {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl DeleteIssue {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for DeleteIssue {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        issue_path(&self.workspace, &self.repo_slug, self.id)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            401 | 403 | 404 | 410 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/issues/{id}/comments`
#[derive(Debug, Clone)]
pub struct ListIssueComments {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub options: ListOptions,
}

impl ListIssueComments {
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

impl Endpoint for ListIssueComments {
    type Output = Outcome<Paginated<IssueComment>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/comments",
            issue_path(&self.workspace, &self.repo_slug, self.id)
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
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/issues/{id}/comments`
#[derive(Debug, Clone)]
pub struct CreateIssueComment {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
    pub body: IssueComment,
}

impl CreateIssueComment {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        id: u64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
            body: IssueComment::new(text),
        }
    }
}

impl Endpoint for CreateIssueComment {
    type Output = Outcome<IssueComment>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/comments",
            issue_path(&self.workspace, &self.repo_slug, self.id)
        )
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            400 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `PUT /repositories/{workspace}/{repo_slug}/issues/{id}/vote`
#[derive(Debug, Clone)]
pub struct VoteIssue {
    pub workspace: String,
    pub repo_slug: String,
    pub id: u64,
}

impl VoteIssue {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, id: u64) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            id,
        }
    }
}

impl Endpoint for VoteIssue {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("{}/vote", issue_path(&self.workspace, &self.repo_slug, self.id))
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueState;

    #[test]
    fn test_update_sends_only_set_fields() {
        let body = Issue {
            state: Some(IssueState::Resolved),
            ..Issue::default()
        };
        let request = UpdateIssue::new("ws", "repo", 12, body);
        assert_eq!(request.path(), "/repositories/ws/repo/issues/12");
        assert_eq!(
            request.body().unwrap(),
            RequestBody::Json(serde_json::json!({"state": "resolved"}))
        );
    }

    #[test]
    fn test_gone_tracker_is_a_failure() {
        let request = ListIssues::new("ws", "repo");
        let outcome = request
            .parse(StatusCode::GONE, br#"{"type": "error", "error": {"message": "moved"}}"#)
            .unwrap()
            .unwrap();
        assert!(matches!(outcome, Outcome::Failure { status, .. } if status == StatusCode::GONE));
    }

    #[test]
    fn test_vote_is_put_without_body() {
        let request = VoteIssue::new("ws", "repo", 4);
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.body().unwrap(), RequestBody::Empty);
        assert_eq!(request.path(), "/repositories/ws/repo/issues/4/vote");
    }
}
