//
//  bitbucket-api
//  api/cloud/workspaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Workspace endpoints.

use reqwest::{Method, StatusCode};

use super::{failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, QueryParams};
use crate::api::Endpoint;
use crate::models::{Workspace, WorkspaceMembership};

/// `GET /workspaces`
///
/// Workspaces the authenticated user has access to.
#[derive(Debug, Clone, Default)]
pub struct ListWorkspaces {
    /// `member`, `collaborator` or `owner`.
    pub role: Option<String>,
    pub options: ListOptions,
}

impl ListWorkspaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListWorkspaces {
    type Output = Outcome<Paginated<Workspace>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/workspaces".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("role", self.role.as_deref());
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /workspaces/{workspace}`
#[derive(Debug, Clone)]
pub struct GetWorkspace {
    pub workspace: String,
}

impl GetWorkspace {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

impl Endpoint for GetWorkspace {
    type Output = Outcome<Workspace>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/workspaces/{}", encode_segment(&self.workspace))
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /workspaces/{workspace}/members`
#[derive(Debug, Clone)]
pub struct ListWorkspaceMembers {
    pub workspace: String,
    pub options: ListOptions,
}

impl ListWorkspaceMembers {
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

impl Endpoint for ListWorkspaceMembers {
    type Output = Outcome<Paginated<WorkspaceMembership>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/workspaces/{}/members", encode_segment(&self.workspace))
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
    fn test_list_workspaces_query() {
        let request = ListWorkspaces::new().role("owner").options(ListOptions {
            pagelen: Some(50),
            ..ListOptions::default()
        });
        let query = request.query();
        assert_eq!(query.get("role"), Some("owner"));
        assert_eq!(query.get("pagelen"), Some("50"));
    }

    #[test]
    fn test_members_decode() {
        let body = br#"{
            "values": [{"type": "workspace_membership", "user": {"display_name": "Ada"}}],
            "page": 1
        }"#;
        let outcome = ListWorkspaceMembers::new("acme")
            .parse(StatusCode::OK, body)
            .unwrap()
            .unwrap();
        let page = outcome.success().unwrap();
        assert_eq!(page.values.len(), 1);
        assert_eq!(
            page.values[0].user.as_ref().and_then(|u| u.display_name.as_deref()),
            Some("Ada")
        );
    }
}
