//
//  bitbucket-api
//  models/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue tracker models.
//!
//! Bitbucket Cloud repositories have an optional built-in issue tracker.
//! Issues carry a state, a kind and a priority, all closed vocabularies.
//!
//! # Issue States
//!
//! - `new` - Newly created, not yet triaged
//! - `open` - Acknowledged and being worked on
//! - `resolved` - Fixed or addressed
//! - `on hold` - Temporarily paused
//! - `invalid` - Not a valid issue
//! - `duplicate` - Duplicate of another issue
//! - `wontfix` - Will not be fixed
//! - `closed` - Closed without resolution
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::models::{Issue, IssueKind, IssuePriority};
//!
//! let issue = Issue {
//!     kind: Some(IssueKind::Bug),
//!     priority: Some(IssuePriority::Critical),
//!     ..Issue::new("Login fails on Safari", "Steps to reproduce...")
//! };
//! let body = serde_json::to_value(&issue).unwrap();
//! assert_eq!(body["content"]["raw"], "Steps to reproduce...");
//! assert_eq!(body["priority"], "critical");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, AdditionalProperties, Content, Links, Repository};

/// An issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<IssueKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<IssuePriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Account>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Account>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watches: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Box<Repository>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Issue {
    /// A new issue body with a title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(Content::raw(description)),
            ..Self::default()
        }
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueComment {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Account>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl IssueComment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: Some(Content::raw(text)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Submitted,
    New,
    Open,
    Resolved,
    #[serde(rename = "on hold")]
    OnHold,
    Invalid,
    Duplicate,
    Wontfix,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::New => "new",
            Self::Open => "open",
            Self::Resolved => "resolved",
            Self::OnHold => "on hold",
            Self::Invalid => "invalid",
            Self::Duplicate => "duplicate",
            Self::Wontfix => "wontfix",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], " ").as_str() {
            "submitted" => Ok(Self::Submitted),
            "new" => Ok(Self::New),
            "open" => Ok(Self::Open),
            "resolved" => Ok(Self::Resolved),
            "on hold" => Ok(Self::OnHold),
            "invalid" => Ok(Self::Invalid),
            "duplicate" => Ok(Self::Duplicate),
            "wontfix" => Ok(Self::Wontfix),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("unknown issue state: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Bug,
    Enhancement,
    Proposal,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    Trivial,
    Minor,
    Major,
    Critical,
    Blocker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_hold_state() {
        let issue: Issue = serde_json::from_str(r#"{"id": 3, "state": "on hold"}"#).unwrap();
        assert_eq!(issue.state, Some(IssueState::OnHold));
        assert_eq!("on_hold".parse::<IssueState>(), Ok(IssueState::OnHold));
        assert_eq!(IssueState::OnHold.to_string(), "on hold");
    }

    #[test]
    fn test_submitted_state() {
        let issue: Issue =
            serde_json::from_str(r#"{"id": 1, "state": "submitted"}"#).unwrap();
        assert_eq!(issue.state, Some(IssueState::Submitted));
        assert_eq!("Submitted".parse::<IssueState>(), Ok(IssueState::Submitted));
        assert_eq!(IssueState::Submitted.as_str(), "submitted");
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        assert!(serde_json::from_str::<Issue>(r#"{"state": "maybe"}"#).is_err());
    }
}
