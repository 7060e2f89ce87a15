//
//  bitbucket-api
//  models/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Pipelines models.
//!
//! A pipeline run has a [`PipelineState`] whose `name` moves through
//! `PENDING`, `IN_PROGRESS` and `COMPLETED`; completed runs carry a `result`
//! (`SUCCESSFUL`, `FAILED`, `ERROR`, `STOPPED`). Running is triggered by
//! posting a [`Pipeline`] with only a target set.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::models::{Pipeline, PipelineTarget, PipelineVariable};
//!
//! let run = Pipeline {
//!     variables: Some(vec![PipelineVariable::new("DEPLOY_ENV", "staging")]),
//!     ..Pipeline::for_target(PipelineTarget::branch("main").with_custom_selector("deploy"))
//! };
//!
//! let body = serde_json::to_value(&run).unwrap();
//! assert_eq!(body["target"]["type"], "pipeline_ref_target");
//! assert_eq!(body["target"]["selector"]["pattern"], "deploy");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, AdditionalProperties, Commit, Links, Repository};

/// A pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Sequential run number within the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Account>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Box<Repository>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PipelineTarget>,

    /// What started the run: `pipeline_trigger_push`, `pipeline_trigger_manual`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<PipelineStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PipelineState>,

    /// Variables passed when the run was triggered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<PipelineVariable>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_seconds_used: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Pipeline {
    /// A trigger body for the given target.
    pub fn for_target(target: PipelineTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    /// `RESULT` for completed runs, the state name otherwise.
    pub fn status_label(&self) -> &str {
        self.state.as_ref().map(PipelineState::label).unwrap_or("UNKNOWN")
    }
}

/// The state of a pipeline or step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineState {
    /// E.g. `pipeline_state_completed`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// `PENDING`, `IN_PROGRESS`, `COMPLETED`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Set on completed runs: `SUCCESSFUL`, `FAILED`, `ERROR`, `STOPPED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PipelineStatus>,

    /// Set on in-progress runs: `RUNNING`, `PAUSED`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PipelineStatus>,
}

impl PipelineState {
    pub fn label(&self) -> &str {
        self.result
            .as_ref()
            .or(self.stage.as_ref())
            .and_then(|s| s.name.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("UNKNOWN")
    }

    /// Whether the run has finished, whatever the result.
    pub fn is_completed(&self) -> bool {
        self.name.as_deref() == Some("COMPLETED")
    }
}

/// A `{type, name}` pair used for results, stages and triggers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineStatus {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// What a pipeline runs against: a ref, a commit or a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineTarget {
    /// `pipeline_ref_target`, `pipeline_commit_target` or
    /// `pipeline_pullrequest_target`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// `branch`, `tag`, `named_branch` or `bookmark`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<PipelineSelector>,

    /// Pull request targets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl PipelineTarget {
    /// The head of a branch.
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            object_type: Some("pipeline_ref_target".to_string()),
            ref_type: Some("branch".to_string()),
            ref_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A specific commit.
    pub fn commit(hash: impl Into<String>) -> Self {
        Self {
            object_type: Some("pipeline_commit_target".to_string()),
            commit: Some(Commit {
                object_type: Some("commit".to_string()),
                ..Commit::with_hash(hash)
            }),
            ..Self::default()
        }
    }

    /// Runs a custom pipeline from `bitbucket-pipelines.yml`.
    pub fn with_custom_selector(mut self, pattern: impl Into<String>) -> Self {
        self.selector = Some(PipelineSelector {
            selector_type: Some("custom".to_string()),
            pattern: Some(pattern.into()),
        });
        self
    }
}

/// Which pipeline definition to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSelector {
    /// `default`, `branches`, `tags`, `bookmarks`, `custom` or `pull-requests`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub selector_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// One step of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineStep {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PipelineState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<u64>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A pipeline variable, either repository-level configuration or passed to a
/// single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineVariable {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Never returned for secured variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secured: Option<bool>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl PipelineVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn secured(mut self) -> Self {
        self.secured = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_pipeline_label() {
        let pipeline: Pipeline = serde_json::from_str(
            r#"{
                "type": "pipeline",
                "uuid": "{p-1}",
                "build_number": 17,
                "state": {
                    "type": "pipeline_state_completed",
                    "name": "COMPLETED",
                    "result": {"type": "pipeline_state_completed_failed", "name": "FAILED"}
                },
                "target": {"type": "pipeline_ref_target", "ref_type": "branch", "ref_name": "main"}
            }"#,
        )
        .unwrap();

        assert_eq!(pipeline.status_label(), "FAILED");
        assert!(pipeline.state.as_ref().unwrap().is_completed());
        assert_eq!(
            pipeline.target.unwrap().ref_name.as_deref(),
            Some("main")
        );
    }

    #[test]
    fn test_commit_target_body() {
        let body = serde_json::to_value(Pipeline::for_target(PipelineTarget::commit("abc123"))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "target": {
                    "type": "pipeline_commit_target",
                    "commit": {"type": "commit", "hash": "abc123"}
                }
            })
        );
    }

    #[test]
    fn test_secured_variable() {
        let variable = PipelineVariable::new("TOKEN", "s3cret").secured();
        assert_eq!(variable.secured, Some(true));
    }
}
