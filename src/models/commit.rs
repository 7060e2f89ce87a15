//
//  bitbucket-api
//  models/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit, diffstat and commit status models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, AdditionalProperties, Content, Links, Repository};

/// A commit.
///
/// Also used, with only `hash` set, as the target of new branches and tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Full 40 character SHA-1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Content>,

    /// Parent commits. Usually only `hash` and `links` are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<Commit>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Box<Repository>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Commit {
    /// Reference to a commit by hash.
    pub fn with_hash(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            ..Self::default()
        }
    }

    /// The first 12 characters of the hash.
    pub fn short_hash(&self) -> &str {
        let hash = self.hash.as_deref().unwrap_or("");
        hash.get(..12).unwrap_or(hash)
    }

    /// The first line of the message.
    pub fn subject(&self) -> &str {
        self.message
            .as_deref()
            .and_then(|m| m.lines().next())
            .unwrap_or("")
    }
}

/// Commit author: the raw `Name <email>` string plus the matched account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitAuthor {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    /// Only set when the email maps to a Bitbucket account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Account>,
}

/// One file of a diffstat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diffstat {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DiffstatStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_added: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_removed: Option<u64>,

    /// The file before the change. `None` for added files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<CommitFile>,

    /// The file after the change. `None` for removed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<CommitFile>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Diffstat {
    /// The path after the change, or before it for removed files.
    pub fn path(&self) -> &str {
        self.new
            .as_ref()
            .or(self.old.as_ref())
            .and_then(|f| f.path.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffstatStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    #[serde(rename = "merge conflict")]
    MergeConflict,
    #[serde(rename = "remote deleted")]
    RemoteDeleted,
    #[serde(rename = "local deleted")]
    LocalDeleted,
}

/// A file reference inside a diffstat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitFile {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub escaped_path: Option<String>,

    /// E.g. `binary`, `executable`, `link`, `lfs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// A build or other status reported against a commit.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::models::{CommitStatus, CommitStatusState};
///
/// let status = CommitStatus {
///     key: Some("ci-build".to_string()),
///     state: Some(CommitStatusState::Successful),
///     url: Some("https://ci.example.com/builds/42".to_string()),
///     ..CommitStatus::default()
/// };
/// assert_eq!(serde_json::to_value(&status).unwrap()["state"], "SUCCESSFUL");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitStatus {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Identifies the status among those of the same commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,

    /// Where the status links to, e.g. a CI build page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CommitStatusState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommitStatusState {
    Inprogress,
    Successful,
    Failed,
    Stopped,
}

impl CommitStatusState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inprogress => "INPROGRESS",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for CommitStatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_helpers() {
        let commit = Commit {
            hash: Some("1a2b3c4d5e6f7a8b9c0d".to_string()),
            message: Some("Fix login\n\nLonger body".to_string()),
            ..Commit::default()
        };
        assert_eq!(commit.short_hash(), "1a2b3c4d5e6f");
        assert_eq!(commit.subject(), "Fix login");
        assert_eq!(Commit::with_hash("abc").short_hash(), "abc");
    }

    #[test]
    fn test_diffstat_removed_file_path() {
        let stat: Diffstat = serde_json::from_str(
            r#"{"type": "diffstat", "status": "removed", "lines_removed": 12,
                "old": {"path": "src/old.rs"}, "new": null}"#,
        )
        .unwrap();
        assert_eq!(stat.status, Some(DiffstatStatus::Removed));
        assert_eq!(stat.path(), "src/old.rs");
    }

    #[test]
    fn test_diffstat_conflict_status() {
        let stat: Diffstat =
            serde_json::from_str(r#"{"status": "merge conflict"}"#).unwrap();
        assert_eq!(stat.status, Some(DiffstatStatus::MergeConflict));
    }
}
