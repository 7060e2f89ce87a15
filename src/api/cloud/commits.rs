//
//  bitbucket-api
//  api/cloud/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit, diff and commit status endpoints.
//!
//! A diff spec is either a single commit (diff against its first parent) or
//! `<from>..<to>`, e.g. `main..feature/login`.

use reqwest::{Method, StatusCode};

use super::{failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_path, encode_segment, repo_path, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::{Commit, CommitStatus, Diffstat};

/// `GET /repositories/{workspace}/{repo_slug}/commits`
///
/// Without `include`, lists commits reachable from the main branch.
#[derive(Debug, Clone)]
pub struct ListCommits {
    pub workspace: String,
    pub repo_slug: String,
    /// Refs or hashes whose history is listed. Sent as repeated `include`.
    pub include: Vec<String>,
    /// Refs or hashes whose history is excluded.
    pub exclude: Vec<String>,
    /// Only commits touching this path.
    pub path: Option<String>,
    pub options: ListOptions,
}

impl ListCommits {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            path: None,
            options: ListOptions::default(),
        }
    }

    pub fn include(mut self, rev: impl Into<String>) -> Self {
        self.include.push(rev.into());
        self
    }

    pub fn exclude(mut self, rev: impl Into<String>) -> Self {
        self.exclude.push(rev.into());
        self
    }

    pub fn touching(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListCommits {
    type Output = Outcome<Paginated<Commit>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/commits", repo_path(&self.workspace, &self.repo_slug))
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_all("include", &self.include);
        params.push_all("exclude", &self.exclude);
        params.push_opt("path", self.path.as_deref());
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

/// `GET /repositories/{workspace}/{repo_slug}/commit/{commit}`
#[derive(Debug, Clone)]
pub struct GetCommit {
    pub workspace: String,
    pub repo_slug: String,
    pub commit: String,
}

impl GetCommit {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            commit: commit.into(),
        }
    }
}

impl Endpoint for GetCommit {
    type Output = Outcome<Commit>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/commit/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.commit)
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

/// `GET /repositories/{workspace}/{repo_slug}/diff/{spec}`
///
/// Returns the unified diff as text.
#[derive(Debug, Clone)]
pub struct GetDiff {
    pub workspace: String,
    pub repo_slug: String,
    pub spec: String,
    /// Lines of context around each change.
    pub context: Option<u32>,
    /// Limit the diff to these paths. Sent as repeated `path`.
    pub paths: Vec<String>,
    pub ignore_whitespace: Option<bool>,
}

impl GetDiff {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        spec: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            spec: spec.into(),
            context: None,
            paths: Vec::new(),
            ignore_whitespace: None,
        }
    }

    pub fn context(mut self, lines: u32) -> Self {
        self.context = Some(lines);
        self
    }

    pub fn limit_to(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = Some(ignore);
        self
    }
}

impl Endpoint for GetDiff {
    type Output = String;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/diff/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.spec)
        )
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("context", self.context);
        params.push_all("path", &self.paths);
        params.push_opt("ignore_whitespace", self.ignore_whitespace);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => Ok(Some(String::from_utf8_lossy(content).into_owned())),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/diffstat/{spec}`
#[derive(Debug, Clone)]
pub struct GetDiffstat {
    pub workspace: String,
    pub repo_slug: String,
    pub spec: String,
    pub ignore_whitespace: Option<bool>,
    pub options: ListOptions,
}

impl GetDiffstat {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        spec: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            spec: spec.into(),
            ignore_whitespace: None,
            options: ListOptions::default(),
        }
    }

    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = Some(ignore);
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for GetDiffstat {
    type Output = Outcome<Paginated<Diffstat>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/diffstat/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.spec)
        )
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("ignore_whitespace", self.ignore_whitespace);
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

/// `GET /repositories/{workspace}/{repo_slug}/commit/{commit}/statuses`
#[derive(Debug, Clone)]
pub struct ListCommitStatuses {
    pub workspace: String,
    pub repo_slug: String,
    pub commit: String,
    pub options: ListOptions,
}

impl ListCommitStatuses {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            commit: commit.into(),
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListCommitStatuses {
    type Output = Outcome<Paginated<CommitStatus>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/commit/{}/statuses",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.commit)
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
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/commit/{commit}/statuses/build`
///
/// Posting a status with an existing `key` replaces it.
#[derive(Debug, Clone)]
pub struct CreateBuildStatus {
    pub workspace: String,
    pub repo_slug: String,
    pub commit: String,
    pub body: CommitStatus,
}

impl CreateBuildStatus {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        commit: impl Into<String>,
        body: CommitStatus,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            commit: commit.into(),
            body,
        }
    }
}

impl Endpoint for CreateBuildStatus {
    type Output = Outcome<CommitStatus>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/commit/{}/statuses/build",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.commit)
        )
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/commit/{commit}/statuses/build/{key}`
#[derive(Debug, Clone)]
pub struct GetBuildStatus {
    pub workspace: String,
    pub repo_slug: String,
    pub commit: String,
    pub key: String,
}

impl GetBuildStatus {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        commit: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            commit: commit.into(),
            key: key.into(),
        }
    }
}

impl Endpoint for GetBuildStatus {
    type Output = Outcome<CommitStatus>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/commit/{}/statuses/build/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.commit),
            encode_path(&self.key)
        )
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
    fn test_list_commits_repeats_include() {
        let request = ListCommits::new("ws", "repo")
            .include("main")
            .include("develop")
            .exclude("release");
        let query = request.query();
        let includes: Vec<_> = query
            .pairs()
            .iter()
            .filter(|(k, _)| k == "include")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(includes, ["main", "develop"]);
        assert_eq!(query.get("exclude"), Some("release"));
    }

    #[test]
    fn test_diff_is_text() {
        let request = GetDiff::new("ws", "repo", "main..feature/x").context(5);
        assert_eq!(
            request.path(),
            "/repositories/ws/repo/diff/main..feature%2Fx"
        );
        assert_eq!(request.query().get("context"), Some("5"));
        let diff = request
            .parse(StatusCode::OK, b"diff --git a/x b/x\n")
            .unwrap();
        assert_eq!(diff.as_deref(), Some("diff --git a/x b/x\n"));
        assert!(request.parse(StatusCode::NOT_FOUND, b"").unwrap().is_none());
    }
}
