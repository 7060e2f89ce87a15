//
//  bitbucket-api
//  api/cloud/webhooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Webhook subscriptions on repositories and workspaces.

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, repo_path, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::WebhookSubscription;

fn hooks_path(workspace: &str, repo_slug: &str) -> String {
    format!("{}/hooks", repo_path(workspace, repo_slug))
}

/// `GET /repositories/{workspace}/{repo_slug}/hooks`
#[derive(Debug, Clone)]
pub struct ListWebhooks {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListWebhooks {
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

impl Endpoint for ListWebhooks {
    type Output = Outcome<Paginated<WebhookSubscription>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        hooks_path(&self.workspace, &self.repo_slug)
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

/// `GET /repositories/{workspace}/{repo_slug}/hooks/{uid}`
#[derive(Debug, Clone)]
pub struct GetWebhook {
    pub workspace: String,
    pub repo_slug: String,
    pub uid: String,
}

impl GetWebhook {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            uid: uid.into(),
        }
    }
}

impl Endpoint for GetWebhook {
    type Output = Outcome<WebhookSubscription>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            hooks_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.uid)
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

/// `POST /repositories/{workspace}/{repo_slug}/hooks`
#[derive(Debug, Clone)]
pub struct CreateWebhook {
    pub workspace: String,
    pub repo_slug: String,
    pub body: WebhookSubscription,
}

impl CreateWebhook {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        body: WebhookSubscription,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }
}

impl Endpoint for CreateWebhook {
    type Output = Outcome<WebhookSubscription>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        hooks_path(&self.workspace, &self.repo_slug)
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

/// `PUT /repositories/{workspace}/{repo_slug}/hooks/{uid}`
#[derive(Debug, Clone)]
pub struct UpdateWebhook {
    pub workspace: String,
    pub repo_slug: String,
    pub uid: String,
    pub body: WebhookSubscription,
}

impl UpdateWebhook {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        uid: impl Into<String>,
        body: WebhookSubscription,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            uid: uid.into(),
            body,
        }
    }
}

impl Endpoint for UpdateWebhook {
    type Output = Outcome<WebhookSubscription>;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            hooks_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.uid)
        )
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /repositories/{workspace}/{repo_slug}/hooks/{uid}`
#[derive(Debug, Clone)]
pub struct DeleteWebhook {
    pub workspace: String,
    pub repo_slug: String,
    pub uid: String,
}

impl DeleteWebhook {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            uid: uid.into(),
        }
    }
}

impl Endpoint for DeleteWebhook {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            hooks_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.uid)
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

/// `GET /workspaces/{workspace}/hooks`
#[derive(Debug, Clone)]
pub struct ListWorkspaceWebhooks {
    pub workspace: String,
    pub options: ListOptions,
}

impl ListWorkspaceWebhooks {
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

impl Endpoint for ListWorkspaceWebhooks {
    type Output = Outcome<Paginated<WebhookSubscription>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/workspaces/{}/hooks", encode_segment(&self.workspace))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_webhook_body() {
        let request = CreateWebhook::new(
            "ws",
            "repo",
            WebhookSubscription::new("https://ci.example.com/hook", ["repo:push"]),
        );
        assert_eq!(
            request.body().unwrap(),
            RequestBody::Json(serde_json::json!({
                "url": "https://ci.example.com/hook",
                "active": true,
                "events": ["repo:push"]
            }))
        );
    }

    #[test]
    fn test_workspace_hooks_path() {
        assert_eq!(
            ListWorkspaceWebhooks::new("acme").path(),
            "/workspaces/acme/hooks"
        );
    }
}
