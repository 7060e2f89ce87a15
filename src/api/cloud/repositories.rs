//
//  bitbucket-api
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::repositories::ListWorkspaceRepositories;
//! use bitbucket_api::api::{Client, ListOptions};
//! use bitbucket_api::models::RepositoryRole;
//!
//! # async fn example() -> bitbucket_api::api::common::Result<()> {
//! let client = Client::cloud()?;
//! let request = ListWorkspaceRepositories::new("myworkspace")
//!     .role(RepositoryRole::Contributor)
//!     .options(ListOptions::new().sort("-updated_on").pagelen(25));
//!
//! let page = client.send_detailed(&request).await?.into_result()?;
//! for repo in &page.values {
//!     println!("{}", repo.display_name());
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, repo_path, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::{Account, Repository, RepositoryRole};

/// `GET /repositories`: all public repositories.
#[derive(Debug, Clone, Default)]
pub struct ListPublicRepositories {
    /// Only repositories created after this instant.
    pub after: Option<DateTime<Utc>>,
    pub role: Option<RepositoryRole>,
    pub options: ListOptions,
}

impl ListPublicRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    pub fn role(mut self, role: RepositoryRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListPublicRepositories {
    type Output = Outcome<Paginated<Repository>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/repositories".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("after", self.after.map(|a| a.to_rfc3339()));
        params.push_opt("role", self.role);
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}`
#[derive(Debug, Clone)]
pub struct ListWorkspaceRepositories {
    pub workspace: String,
    pub role: Option<RepositoryRole>,
    pub options: ListOptions,
}

impl ListWorkspaceRepositories {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            role: None,
            options: ListOptions::default(),
        }
    }

    pub fn role(mut self, role: RepositoryRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListWorkspaceRepositories {
    type Output = Outcome<Paginated<Repository>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/repositories/{}", encode_segment(&self.workspace))
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("role", self.role);
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            404 | 410 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}`
#[derive(Debug, Clone)]
pub struct GetRepository {
    pub workspace: String,
    pub repo_slug: String,
}

impl GetRepository {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
        }
    }
}

impl Endpoint for GetRepository {
    type Output = Outcome<Repository>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        repo_path(&self.workspace, &self.repo_slug)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}`
///
/// The slug in the path names the new repository; `body.name` may differ.
#[derive(Debug, Clone)]
pub struct CreateRepository {
    pub workspace: String,
    pub repo_slug: String,
    pub body: Repository,
}

impl CreateRepository {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        body: Repository,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }
}

impl Endpoint for CreateRepository {
    type Output = Outcome<Repository>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        repo_path(&self.workspace, &self.repo_slug)
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 | 201 => ok(content),
            400 | 401 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `PUT /repositories/{workspace}/{repo_slug}`
///
/// Creates the repository when it does not exist yet (201).
#[derive(Debug, Clone)]
pub struct UpdateRepository {
    pub workspace: String,
    pub repo_slug: String,
    pub body: Repository,
}

impl UpdateRepository {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        body: Repository,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }
}

impl Endpoint for UpdateRepository {
    type Output = Outcome<Repository>;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        repo_path(&self.workspace, &self.repo_slug)
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 | 201 => ok(content),
            400 | 401 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /repositories/{workspace}/{repo_slug}`
#[derive(Debug, Clone)]
pub struct DeleteRepository {
    pub workspace: String,
    pub repo_slug: String,
    /// URL visitors of the old repository are sent to.
    pub redirect_to: Option<String>,
}

impl DeleteRepository {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            redirect_to: None,
        }
    }

    pub fn redirect_to(mut self, url: impl Into<String>) -> Self {
        self.redirect_to = Some(url.into());
        self
    }
}

impl Endpoint for DeleteRepository {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        repo_path(&self.workspace, &self.repo_slug)
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("redirect_to", self.redirect_to.as_deref());
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/forks`
#[derive(Debug, Clone)]
pub struct ListForks {
    pub workspace: String,
    pub repo_slug: String,
    pub role: Option<RepositoryRole>,
    pub options: ListOptions,
}

impl ListForks {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            role: None,
            options: ListOptions::default(),
        }
    }

    pub fn role(mut self, role: RepositoryRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListForks {
    type Output = Outcome<Paginated<Repository>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/forks", repo_path(&self.workspace, &self.repo_slug))
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("role", self.role);
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/forks`
///
/// `body.name` names the fork and `body.workspace` picks where it goes;
/// everything else is inherited from the parent.
#[derive(Debug, Clone)]
pub struct ForkRepository {
    pub workspace: String,
    pub repo_slug: String,
    pub body: Repository,
}

impl ForkRepository {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        body: Repository,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }
}

impl Endpoint for ForkRepository {
    type Output = Outcome<Repository>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("{}/forks", repo_path(&self.workspace, &self.repo_slug))
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            400 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/watchers`
#[derive(Debug, Clone)]
pub struct ListWatchers {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListWatchers {
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

impl Endpoint for ListWatchers {
    type Output = Outcome<Paginated<Account>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/watchers", repo_path(&self.workspace, &self.repo_slug))
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_workspace_query() {
        let request = ListWorkspaceRepositories::new("my team")
            .role(RepositoryRole::Admin)
            .options(ListOptions::new().pagelen(10));
        assert_eq!(request.path(), "/repositories/my%20team");
        let query = request.query();
        assert_eq!(query.get("role"), Some("admin"));
        assert_eq!(query.get("pagelen"), Some("10"));
    }

    #[test]
    fn test_get_repository_dispatch() {
        let request = GetRepository::new("ws", "repo");
        let found = request
            .parse(StatusCode::OK, br#"{"full_name": "ws/repo"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(found.success().unwrap().display_name(), "ws/repo");

        let missing = request
            .parse(
                StatusCode::NOT_FOUND,
                br#"{"type": "error", "error": {"message": "Repository ws/repo not found"}}"#,
            )
            .unwrap()
            .unwrap();
        assert_eq!(missing.error_message(), Some("Repository ws/repo not found"));

        assert!(request
            .parse(StatusCode::INTERNAL_SERVER_ERROR, b"")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete_repository_no_content() {
        let request = DeleteRepository::new("ws", "repo").redirect_to("https://example.com");
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.query().get("redirect_to"), Some("https://example.com"));
        assert_eq!(
            request.parse(StatusCode::NO_CONTENT, b"").unwrap(),
            Some(Outcome::Success(()))
        );
    }

    #[test]
    fn test_decode_error_on_documented_status() {
        let request = GetRepository::new("ws", "repo");
        assert!(matches!(
            request.parse(StatusCode::OK, b"not json"),
            Err(crate::api::ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_public_repositories_after() {
        let after = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let request = ListPublicRepositories::new().after(after);
        assert_eq!(request.query().get("after"), Some("2024-01-01T00:00:00+00:00"));
    }
}
