//
//  bitbucket-api
//  models/pullrequest.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request models.
//!
//! A pull request proposes merging the source branch into the destination
//! branch, usually within the same repository or from a fork. The
//! [`PullRequest`] model doubles as the create/update body; only the fields
//! set are sent.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::models::{Account, PullRequest};
//!
//! let request = PullRequest {
//!     title: Some("Add user authentication".to_string()),
//!     close_source_branch: Some(true),
//!     reviewers: Some(vec![Account::with_uuid("{reviewer-uuid}")]),
//!     ..PullRequest::between("feature/auth", "main")
//! };
//!
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["source"]["branch"]["name"], "feature/auth");
//! assert_eq!(body["destination"]["branch"]["name"], "main");
//! ```
//!
//! # Pull Request States
//!
//! - `OPEN` - Active and awaiting review or merge
//! - `MERGED` - Changes merged into the destination branch
//! - `DECLINED` - Closed without merging
//! - `SUPERSEDED` - Replaced by another pull request

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, AdditionalProperties, Commit, Content, Links, Repository};

/// A pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Number unique within the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Markdown description. Mirrors `summary.raw`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PullRequestState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Account>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PullRequestEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PullRequestEndpoint>,

    /// Set once merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_commit: Option<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<Account>,

    /// Why the pull request was declined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<Account>>,

    /// Everyone who reviewed, approved or commented.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Participant>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl PullRequest {
    /// A pull request body from one branch to another in the same repository.
    pub fn between(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: Some(PullRequestEndpoint::branch(source)),
            destination: Some(PullRequestEndpoint::branch(destination)),
            ..Self::default()
        }
    }

    /// Name of the source branch.
    pub fn source_branch(&self) -> Option<&str> {
        self.source.as_ref().and_then(PullRequestEndpoint::branch_name)
    }

    /// Name of the destination branch.
    pub fn destination_branch(&self) -> Option<&str> {
        self.destination
            .as_ref()
            .and_then(PullRequestEndpoint::branch_name)
    }

    /// Number of participants who approved.
    pub fn approvals(&self) -> usize {
        self.participants
            .iter()
            .flatten()
            .filter(|p| p.approved == Some(true))
            .count()
    }
}

/// One side of a pull request: repository, branch and commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Box<Repository>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<PullRequestBranch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,
}

impl PullRequestEndpoint {
    /// An endpoint naming only a branch.
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            branch: Some(PullRequestBranch {
                name: Some(name.into()),
                ..PullRequestBranch::default()
            }),
            ..Self::default()
        }
    }

    pub fn branch_name(&self) -> Option<&str> {
        self.branch.as_ref().and_then(|b| b.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestBranch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_strategies: Option<Vec<MergeStrategy>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_merge_strategy: Option<MergeStrategy>,
}

/// A reviewer or participant of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Account>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ParticipantRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,

    /// `approved`, `changes_requested`, or `None` when undecided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ParticipantState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participated_on: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParticipantRole {
    Participant,
    Reviewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantState {
    Approved,
    ChangesRequested,
}

/// A comment on a pull request, optionally inline on a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestComment {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Account>,

    /// The comment this one replies to. Only `id` is needed when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<CommentParent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlineLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    /// Draft comments are only visible to their author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl PullRequestComment {
    /// A new top-level comment.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: Some(Content::raw(text)),
            ..Self::default()
        }
    }
}

/// Reference to a parent comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentParent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Where an inline comment is anchored.
///
/// `from` is the line in the old version, `to` the line in the new one; one of
/// them is `None` for lines that were added or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
}

/// Body of a merge request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeParameters {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Merge commit message. Bitbucket generates one when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_strategy: Option<MergeStrategy>,
}

/// Progress of a merge that was queued instead of completing in the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeTaskStatus {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// `PENDING` or `SUCCESS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_status: Option<String>,

    /// The merged pull request, once `task_status` is `SUCCESS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_result: Option<PullRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl MergeTaskStatus {
    /// URL to poll for the final result.
    pub fn poll_url(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.href("self"))
    }
}

/// What a merge request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PullRequestMerge {
    /// The merge completed within the request.
    Merged(PullRequest),
    /// The merge was queued; poll the task for the result.
    Queued(MergeTaskStatus),
}

/// The state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestState {
    Open,
    Merged,
    Declined,
    Superseded,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
            Self::Superseded => "SUPERSEDED",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullRequestState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            "DECLINED" => Ok(Self::Declined),
            "SUPERSEDED" => Ok(Self::Superseded),
            _ => Err(format!("unknown pull request state: {}", s)),
        }
    }
}

/// How a pull request is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    MergeCommit,
    Squash,
    FastForward,
    SquashFastForward,
    RebaseFastForward,
    RebaseMerge,
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").to_lowercase().as_str() {
            "merge_commit" | "merge" => Ok(Self::MergeCommit),
            "squash" => Ok(Self::Squash),
            "fast_forward" => Ok(Self::FastForward),
            "squash_fast_forward" => Ok(Self::SquashFastForward),
            "rebase_fast_forward" => Ok(Self::RebaseFastForward),
            "rebase_merge" => Ok(Self::RebaseMerge),
            _ => Err(format!("unknown merge strategy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_from_api_payload() {
        let pr: PullRequest = serde_json::from_str(
            r#"{
                "type": "pullrequest",
                "id": 42,
                "title": "Add login",
                "state": "OPEN",
                "source": {"branch": {"name": "feature/login"}, "commit": {"hash": "abc"}},
                "destination": {"branch": {"name": "main"}},
                "participants": [
                    {"type": "participant", "role": "REVIEWER", "approved": true, "state": "approved"},
                    {"type": "participant", "role": "PARTICIPANT", "approved": false, "state": null}
                ],
                "created_on": "2024-01-15T10:30:00.000000+00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(pr.id, Some(42));
        assert_eq!(pr.state, Some(PullRequestState::Open));
        assert_eq!(pr.source_branch(), Some("feature/login"));
        assert_eq!(pr.destination_branch(), Some("main"));
        assert_eq!(pr.approvals(), 1);
    }

    #[test]
    fn test_merge_parameters_body() {
        let params = MergeParameters {
            merge_strategy: Some(MergeStrategy::SquashFastForward),
            close_source_branch: Some(true),
            ..MergeParameters::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"close_source_branch": true, "merge_strategy": "squash_fast_forward"})
        );
    }

    #[test]
    fn test_state_and_strategy_parse() {
        assert_eq!("merged".parse::<PullRequestState>(), Ok(PullRequestState::Merged));
        assert!("closed".parse::<PullRequestState>().is_err());
        assert_eq!("squash".parse::<MergeStrategy>(), Ok(MergeStrategy::Squash));
        assert_eq!(
            "fast-forward".parse::<MergeStrategy>(),
            Ok(MergeStrategy::FastForward)
        );
    }
}
