//
//  bitbucket-api
//  models/repository.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository models.
//!
//! Repositories are the core resource in Bitbucket. They belong to a
//! workspace and optionally to a project within that workspace. The same
//! [`Repository`] model is read from the API and sent as the body of create
//! and update requests.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::models::{ForkPolicy, Project, Repository};
//!
//! let repo = Repository {
//!     scm: Some("git".to_string()),
//!     is_private: Some(true),
//!     description: Some("Main backend microservice".to_string()),
//!     fork_policy: Some(ForkPolicy::NoPublicForks),
//!     project: Some(Project::with_key("BACKEND")),
//!     ..Repository::default()
//! };
//!
//! let body = serde_json::to_value(&repo).unwrap();
//! assert_eq!(body["fork_policy"], "no_public_forks");
//! assert_eq!(body["project"], serde_json::json!({"key": "BACKEND"}));
//! ```
//!
//! # Notes
//!
//! - Repository slugs are URL-safe versions of repository names
//! - The `full_name` field follows the format `{workspace}/{repo_slug}`

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, AdditionalProperties, Links, Project, Workspace};

/// A Bitbucket Cloud repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Unique identifier, e.g. `{123e4567-e89b-...}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// `{workspace_slug}/{repo_slug}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Always `git` on Bitbucket Cloud today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_policy: Option<ForkPolicy>,

    /// Primary language, lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Size on disk in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// The main branch. Only `name` and `type` are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mainbranch: Option<MainBranch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Account>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,

    /// The repository this one was forked from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Repository>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Repository {
    /// `full_name`, or `slug` when the full name is missing.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.slug.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

/// The `mainbranch` reference of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainBranch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Who may fork a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForkPolicy {
    AllowForks,
    /// Only private forks.
    NoPublicForks,
    NoForks,
}

/// Filters list results to repositories where the caller has at least this role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositoryRole {
    Member,
    Contributor,
    Admin,
    Owner,
}

impl RepositoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Contributor => "contributor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for RepositoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_from_api_payload() {
        let repo: Repository = serde_json::from_str(
            r#"{
                "type": "repository",
                "full_name": "ws/api",
                "slug": "api",
                "is_private": true,
                "fork_policy": "no_forks",
                "mainbranch": {"type": "branch", "name": "main"},
                "owner": {"type": "team", "display_name": "WS"},
                "parent": {"full_name": "upstream/api"},
                "created_on": "2024-01-15T10:30:00.000000+00:00",
                "override_settings": {"default_merge_strategy": true}
            }"#,
        )
        .unwrap();

        assert_eq!(repo.display_name(), "ws/api");
        assert_eq!(repo.fork_policy, Some(ForkPolicy::NoForks));
        assert_eq!(repo.mainbranch.unwrap().name.as_deref(), Some("main"));
        assert_eq!(
            repo.parent.unwrap().full_name.as_deref(),
            Some("upstream/api")
        );
        assert!(repo.created_on.is_some());
        assert!(repo.additional_properties.contains_key("override_settings"));
    }

    #[test]
    fn test_default_serializes_empty() {
        let value = serde_json::to_value(Repository::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
