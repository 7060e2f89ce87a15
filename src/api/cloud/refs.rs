//
//  bitbucket-api
//  api/cloud/refs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch and tag endpoints.
//!
//! Branch names may contain `/`; they are encoded as a single path segment.

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, repo_path, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::{Branch, Tag};

/// `GET /repositories/{workspace}/{repo_slug}/refs/branches`
#[derive(Debug, Clone)]
pub struct ListBranches {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListBranches {
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

impl Endpoint for ListBranches {
    type Output = Outcome<Paginated<Branch>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/refs/branches", repo_path(&self.workspace, &self.repo_slug))
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

/// `GET /repositories/{workspace}/{repo_slug}/refs/branches/{name}`
#[derive(Debug, Clone)]
pub struct GetBranch {
    pub workspace: String,
    pub repo_slug: String,
    pub name: String,
}

impl GetBranch {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            name: name.into(),
        }
    }
}

impl Endpoint for GetBranch {
    type Output = Outcome<Branch>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/refs/branches/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.name)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/refs/branches`
#[derive(Debug, Clone)]
pub struct CreateBranch {
    pub workspace: String,
    pub repo_slug: String,
    pub body: Branch,
}

impl CreateBranch {
    /// Creates `name` pointing at `target_hash`.
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        name: impl Into<String>,
        target_hash: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body: Branch::new(name, target_hash),
        }
    }
}

impl Endpoint for CreateBranch {
    type Output = Outcome<Branch>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("{}/refs/branches", repo_path(&self.workspace, &self.repo_slug))
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

/// `DELETE /repositories/{workspace}/{repo_slug}/refs/branches/{name}`
#[derive(Debug, Clone)]
pub struct DeleteBranch {
    pub workspace: String,
    pub repo_slug: String,
    pub name: String,
}

impl DeleteBranch {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            name: name.into(),
        }
    }
}

impl Endpoint for DeleteBranch {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!(
            "{}/refs/branches/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.name)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/refs/tags`
#[derive(Debug, Clone)]
pub struct ListTags {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListTags {
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

impl Endpoint for ListTags {
    type Output = Outcome<Paginated<Tag>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/refs/tags", repo_path(&self.workspace, &self.repo_slug))
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

/// `POST /repositories/{workspace}/{repo_slug}/refs/tags`
#[derive(Debug, Clone)]
pub struct CreateTag {
    pub workspace: String,
    pub repo_slug: String,
    pub body: Tag,
}

impl CreateTag {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        name: impl Into<String>,
        target_hash: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body: Tag::new(name, target_hash),
        }
    }

    /// Makes it an annotated tag.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }
}

impl Endpoint for CreateTag {
    type Output = Outcome<Tag>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("{}/refs/tags", repo_path(&self.workspace, &self.repo_slug))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_name_with_slash_is_one_segment() {
        let request = GetBranch::new("ws", "repo", "feature/login");
        assert_eq!(
            request.path(),
            "/repositories/ws/repo/refs/branches/feature%2Flogin"
        );
    }

    #[test]
    fn test_create_tag_body() {
        let request = CreateTag::new("ws", "repo", "v1.0.0", "abc123").message("First release");
        assert_eq!(
            request.body().unwrap(),
            RequestBody::Json(serde_json::json!({
                "name": "v1.0.0",
                "target": {"hash": "abc123"},
                "message": "First release"
            }))
        );
    }
}
