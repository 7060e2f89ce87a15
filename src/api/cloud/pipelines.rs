//
//  bitbucket-api
//  api/cloud/pipelines.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipelines endpoints.
//!
//! Pipeline and step UUIDs come back wrapped in braces (`{...}`); pass them as
//! returned; they are encoded like any other segment.
//!
//! # Lifecycle
//!
//! ```text
//! PENDING -> IN_PROGRESS -> COMPLETED (SUCCESSFUL/FAILED/STOPPED/ERROR)
//!                       \-> PAUSED -> IN_PROGRESS -> ...
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::pipelines::TriggerPipeline;
//! use bitbucket_api::api::Client;
//! use bitbucket_api::models::{Pipeline, PipelineTarget};
//!
//! # async fn example() -> bitbucket_api::api::common::Result<()> {
//! let client = Client::cloud()?;
//! let body = Pipeline::for_target(PipelineTarget::branch("main").with_custom_selector("deploy"));
//! let run = client.send(&TriggerPipeline::new("ws", "repo", body)).await?;
//! # Ok(())
//! # }
//! ```

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, repo_path, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::{Pipeline, PipelineStep, PipelineVariable};

fn pipeline_path(workspace: &str, repo_slug: &str, uuid: &str) -> String {
    format!(
        "{}/pipelines/{}",
        repo_path(workspace, repo_slug),
        encode_segment(uuid)
    )
}

fn variables_path(workspace: &str, repo_slug: &str) -> String {
    format!("{}/pipelines_config/variables", repo_path(workspace, repo_slug))
}

/// `GET /repositories/{workspace}/{repo_slug}/pipelines`
#[derive(Debug, Clone)]
pub struct ListPipelines {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListPipelines {
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

impl Endpoint for ListPipelines {
    type Output = Outcome<Paginated<Pipeline>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("{}/pipelines", repo_path(&self.workspace, &self.repo_slug))
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

/// `GET /repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}`
#[derive(Debug, Clone)]
pub struct GetPipeline {
    pub workspace: String,
    pub repo_slug: String,
    pub pipeline_uuid: String,
}

impl GetPipeline {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        pipeline_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            pipeline_uuid: pipeline_uuid.into(),
        }
    }
}

impl Endpoint for GetPipeline {
    type Output = Outcome<Pipeline>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        pipeline_path(&self.workspace, &self.repo_slug, &self.pipeline_uuid)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /repositories/{workspace}/{repo_slug}/pipelines`
#[derive(Debug, Clone)]
pub struct TriggerPipeline {
    pub workspace: String,
    pub repo_slug: String,
    pub body: Pipeline,
}

impl TriggerPipeline {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, body: Pipeline) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }

    /// Passes a variable to this run only.
    pub fn variable(mut self, variable: PipelineVariable) -> Self {
        self.body.variables.get_or_insert_with(Vec::new).push(variable);
        self
    }
}

impl Endpoint for TriggerPipeline {
    type Output = Outcome<Pipeline>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("{}/pipelines", repo_path(&self.workspace, &self.repo_slug))
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

/// `POST /repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/stopPipeline`
#[derive(Debug, Clone)]
pub struct StopPipeline {
    pub workspace: String,
    pub repo_slug: String,
    pub pipeline_uuid: String,
}

impl StopPipeline {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        pipeline_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            pipeline_uuid: pipeline_uuid.into(),
        }
    }
}

impl Endpoint for StopPipeline {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!(
            "{}/stopPipeline",
            pipeline_path(&self.workspace, &self.repo_slug, &self.pipeline_uuid)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            400 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/steps`
#[derive(Debug, Clone)]
pub struct ListPipelineSteps {
    pub workspace: String,
    pub repo_slug: String,
    pub pipeline_uuid: String,
    pub options: ListOptions,
}

impl ListPipelineSteps {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        pipeline_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            pipeline_uuid: pipeline_uuid.into(),
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListPipelineSteps {
    type Output = Outcome<Paginated<PipelineStep>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/steps",
            pipeline_path(&self.workspace, &self.repo_slug, &self.pipeline_uuid)
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

/// `GET /repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/steps/{step_uuid}`
#[derive(Debug, Clone)]
pub struct GetPipelineStep {
    pub workspace: String,
    pub repo_slug: String,
    pub pipeline_uuid: String,
    pub step_uuid: String,
}

impl GetPipelineStep {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        pipeline_uuid: impl Into<String>,
        step_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            pipeline_uuid: pipeline_uuid.into(),
            step_uuid: step_uuid.into(),
        }
    }
}

impl Endpoint for GetPipelineStep {
    type Output = Outcome<PipelineStep>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/steps/{}",
            pipeline_path(&self.workspace, &self.repo_slug, &self.pipeline_uuid),
            encode_segment(&self.step_uuid)
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

/// `GET /repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/steps/{step_uuid}/log`
///
/// The log is plain text and may be large; it is returned as bytes. A step
/// that has not produced output yet answers 304, which decodes to an empty
/// log.
#[derive(Debug, Clone)]
pub struct GetPipelineStepLog {
    pub workspace: String,
    pub repo_slug: String,
    pub pipeline_uuid: String,
    pub step_uuid: String,
}

impl GetPipelineStepLog {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        pipeline_uuid: impl Into<String>,
        step_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            pipeline_uuid: pipeline_uuid.into(),
            step_uuid: step_uuid.into(),
        }
    }
}

impl Endpoint for GetPipelineStepLog {
    type Output = Outcome<Vec<u8>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/steps/{}/log",
            pipeline_path(&self.workspace, &self.repo_slug, &self.pipeline_uuid),
            encode_segment(&self.step_uuid)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => Ok(Some(Outcome::Success(content.to_vec()))),
            304 => Ok(Some(Outcome::Success(Vec::new()))),
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /repositories/{workspace}/{repo_slug}/pipelines_config/variables`
#[derive(Debug, Clone)]
pub struct ListPipelineVariables {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListPipelineVariables {
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

impl Endpoint for ListPipelineVariables {
    type Output = Outcome<Paginated<PipelineVariable>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        variables_path(&self.workspace, &self.repo_slug)
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

/// `POST /repositories/{workspace}/{repo_slug}/pipelines_config/variables`
#[derive(Debug, Clone)]
pub struct CreatePipelineVariable {
    pub workspace: String,
    pub repo_slug: String,
    pub body: PipelineVariable,
}

impl CreatePipelineVariable {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        body: PipelineVariable,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            body,
        }
    }
}

impl Endpoint for CreatePipelineVariable {
    type Output = Outcome<PipelineVariable>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        variables_path(&self.workspace, &self.repo_slug)
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    /// 409 means a variable with the same key exists.
    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            404 | 409 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `PUT /repositories/{workspace}/{repo_slug}/pipelines_config/variables/{variable_uuid}`
#[derive(Debug, Clone)]
pub struct UpdatePipelineVariable {
    pub workspace: String,
    pub repo_slug: String,
    pub variable_uuid: String,
    pub body: PipelineVariable,
}

impl UpdatePipelineVariable {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        variable_uuid: impl Into<String>,
        body: PipelineVariable,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            variable_uuid: variable_uuid.into(),
            body,
        }
    }
}

impl Endpoint for UpdatePipelineVariable {
    type Output = Outcome<PipelineVariable>;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            variables_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.variable_uuid)
        )
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /repositories/{workspace}/{repo_slug}/pipelines_config/variables/{variable_uuid}`
#[derive(Debug, Clone)]
pub struct DeletePipelineVariable {
    pub workspace: String,
    pub repo_slug: String,
    pub variable_uuid: String,
}

impl DeletePipelineVariable {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        variable_uuid: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            variable_uuid: variable_uuid.into(),
        }
    }
}

impl Endpoint for DeletePipelineVariable {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            variables_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.variable_uuid)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PipelineTarget;

    #[test]
    fn test_uuid_braces_are_encoded() {
        let request = StopPipeline::new("ws", "repo", "{1234}");
        assert_eq!(
            request.path(),
            "/repositories/ws/repo/pipelines/%7B1234%7D/stopPipeline"
        );
    }

    #[test]
    fn test_trigger_with_variables() {
        let request = TriggerPipeline::new(
            "ws",
            "repo",
            Pipeline::for_target(PipelineTarget::branch("main")),
        )
        .variable(PipelineVariable::new("ENV", "staging"));

        let RequestBody::Json(body) = request.body().unwrap() else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["target"]["ref_name"], "main");
        assert_eq!(body["variables"][0]["key"], "ENV");
        assert_eq!(body["variables"][0]["value"], "staging");
    }

    #[test]
    fn test_step_log_not_modified_is_empty() {
        let request = GetPipelineStepLog::new("ws", "repo", "{p}", "{s}");
        assert_eq!(
            request.parse(StatusCode::NOT_MODIFIED, b"").unwrap(),
            Some(Outcome::Success(Vec::new()))
        );
        assert_eq!(
            request.parse(StatusCode::OK, b"+ cargo test\n").unwrap(),
            Some(Outcome::Success(b"+ cargo test\n".to_vec()))
        );
    }

    #[test]
    fn test_duplicate_variable_conflict() {
        let request = CreatePipelineVariable::new("ws", "repo", PipelineVariable::new("K", "V"));
        let outcome = request
            .parse(StatusCode::CONFLICT, br#"{"error": {"message": "exists"}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.error_message(), Some("exists"));
    }
}
