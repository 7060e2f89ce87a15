//
//  bitbucket-api
//  api/cloud/deployments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Deployment environments and deployments.

use reqwest::{Method, StatusCode};

use super::{failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, repo_path, QueryParams};
use crate::api::Endpoint;
use crate::models::{Deployment, Environment};

/// `GET /repositories/{workspace}/{repo_slug}/environments`
#[derive(Debug, Clone)]
pub struct ListEnvironments {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListEnvironments {
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

impl Endpoint for ListEnvironments {
    type Output = Outcome<Paginated<Environment>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/environments", repo_path(&self.workspace, &self.repo_slug))
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

/// `GET /repositories/{workspace}/{repo_slug}/environments/{environment_uuid}`
#[derive(Debug, Clone)]
pub struct GetEnvironment {
    pub workspace: String,
    pub repo_slug: String,
    pub environment_uuid: String,
}

impl GetEnvironment {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        environment_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            environment_uuid: environment_uuid.into(),
        }
    }
}

impl Endpoint for GetEnvironment {
    type Output = Outcome<Environment>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/environments/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.environment_uuid)
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

/// `GET /repositories/{workspace}/{repo_slug}/deployments`
#[derive(Debug, Clone)]
pub struct ListDeployments {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListDeployments {
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

impl Endpoint for ListDeployments {
    type Output = Outcome<Paginated<Deployment>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/deployments", repo_path(&self.workspace, &self.repo_slug))
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

/// `GET /repositories/{workspace}/{repo_slug}/deployments/{deployment_uuid}`
#[derive(Debug, Clone)]
pub struct GetDeployment {
    pub workspace: String,
    pub repo_slug: String,
    pub deployment_uuid: String,
}

impl GetDeployment {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        deployment_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            deployment_uuid: deployment_uuid.into(),
        }
    }
}

impl Endpoint for GetDeployment {
    type Output = Outcome<Deployment>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/deployments/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.deployment_uuid)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_decode() {
        let body = br##"{
            "values": [{
                "uuid": "{d1}",
                "state": {"name": "COMPLETED", "status": {"name": "SUCCESSFUL"}},
                "environment": {"uuid": "{e1}"},
                "release": {"name": "#42"}
            }]
        }"##;
        let outcome = ListDeployments::new("ws", "repo")
            .parse(StatusCode::OK, body)
            .unwrap()
            .unwrap();
        let page = outcome.success().unwrap();
        let state = page.values[0].state.as_ref().unwrap();
        assert_eq!(state.name.as_deref(), Some("COMPLETED"));
        assert_eq!(
            state.status.as_ref().and_then(|s| s.name.as_deref()),
            Some("SUCCESSFUL")
        );
    }
}
