//
//  bitbucket-api
//  api/cloud/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project endpoints. Projects are addressed by their key.

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::Project;

fn projects_path(workspace: &str) -> String {
    format!("/workspaces/{}/projects", encode_segment(workspace))
}

/// `GET /workspaces/{workspace}/projects`
#[derive(Debug, Clone)]
pub struct ListProjects {
    pub workspace: String,
    pub options: ListOptions,
}

impl ListProjects {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListProjects {
    type Output = Outcome<Paginated<Project>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        projects_path(&self.workspace)
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /workspaces/{workspace}/projects/{project_key}`
#[derive(Debug, Clone)]
pub struct GetProject {
    pub workspace: String,
    pub project_key: String,
}

impl GetProject {
    pub fn new(workspace: impl Into<String>, project_key: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            project_key: project_key.into(),
        }
    }
}

impl Endpoint for GetProject {
    type Output = Outcome<Project>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            projects_path(&self.workspace),
            encode_segment(&self.project_key)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /workspaces/{workspace}/projects`
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub workspace: String,
    pub body: Project,
}

impl CreateProject {
    /// A project needs at least a key and a name.
    pub fn new(
        workspace: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            body: Project {
                name: Some(name.into()),
                ..Project::with_key(key)
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.body.description = Some(description.into());
        self
    }

    pub fn private(mut self, is_private: bool) -> Self {
        self.body.is_private = Some(is_private);
        self
    }
}

impl Endpoint for CreateProject {
    type Output = Outcome<Project>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        projects_path(&self.workspace)
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            400 | 401 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /workspaces/{workspace}/projects/{project_key}`
///
/// Bitbucket refuses to delete projects that still contain repositories.
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub workspace: String,
    pub project_key: String,
}

impl DeleteProject {
    pub fn new(workspace: impl Into<String>, project_key: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            project_key: project_key.into(),
        }
    }
}

impl Endpoint for DeleteProject {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            projects_path(&self.workspace),
            encode_segment(&self.project_key)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            401 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_body() {
        let request = CreateProject::new("acme", "CORE", "Core services").private(true);
        assert_eq!(request.path(), "/workspaces/acme/projects");
        assert_eq!(
            request.body().unwrap(),
            RequestBody::Json(serde_json::json!({
                "key": "CORE",
                "name": "Core services",
                "is_private": true
            }))
        );
    }

    #[test]
    fn test_delete_project_undocumented_status() {
        let request = DeleteProject::new("acme", "CORE");
        assert_eq!(request.parse(StatusCode::CONFLICT, b"").unwrap(), None);
    }
}
