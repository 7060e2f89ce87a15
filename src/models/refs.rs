//
//  bitbucket-api
//  models/refs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch and tag models.
//!
//! Both are named references to a [`Commit`]. Creating one only needs `name`
//! and `target.hash`:
//!
//! ```rust
//! use bitbucket_api::models::Branch;
//!
//! let branch = Branch::new("feature/login", "1a2b3c4d");
//! assert_eq!(
//!     serde_json::to_value(&branch).unwrap(),
//!     serde_json::json!({"name": "feature/login", "target": {"hash": "1a2b3c4d"}})
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdditionalProperties, Commit, CommitAuthor, Links, MergeStrategy};

/// A branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The commit at the tip of the branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Commit>,

    /// Strategies allowed when merging pull requests into this branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_strategies: Option<Vec<MergeStrategy>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_merge_strategy: Option<MergeStrategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Branch {
    /// A new branch at the given commit.
    pub fn new(name: impl Into<String>, target_hash: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            target: Some(Commit::with_hash(target_hash)),
            ..Self::default()
        }
    }
}

/// A tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Commit>,

    /// Annotation message. `None` for lightweight tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagger: Option<CommitAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Tag {
    /// A new tag at the given commit.
    pub fn new(name: impl Into<String>, target_hash: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            target: Some(Commit::with_hash(target_hash)),
            ..Self::default()
        }
    }
}
