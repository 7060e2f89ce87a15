//
//  bitbucket-api
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 endpoints.
//!
//! One struct per operation. Each implements [`Endpoint`](super::Endpoint),
//! so any of them can be sent with the four [`Client`](super::Client) call
//! variants.
//!
//! # Module Organization
//!
//! - [`repositories`] - Repository CRUD, forks and watchers
//! - [`refs`] - Branches and tags
//! - [`commits`] - Commits, diffs, diffstats and commit statuses
//! - [`source`] - Raw file contents
//! - [`pullrequests`] - Pull requests, reviews, merges and comments
//! - [`issues`] - Issue tracker
//! - [`pipelines`] - Pipeline runs, steps, logs and variables
//! - [`workspaces`] - Workspaces and members
//! - [`projects`] - Projects within a workspace
//! - [`users`] - Accounts
//! - [`ssh`] - SSH keys of a user
//! - [`webhooks`] - Repository and workspace webhooks
//! - [`deployments`] - Environments and deployments
//! - [`downloads`] - Repository downloads
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::repositories::CreateRepository;
//! use bitbucket_api::api::Client;
//! use bitbucket_api::models::Repository;
//!
//! # fn example() -> bitbucket_api::api::common::Result<()> {
//! let client = Client::cloud()?;
//! let request = CreateRepository::new(
//!     "myworkspace",
//!     "my-new-repo",
//!     Repository {
//!         scm: Some("git".to_string()),
//!         is_private: Some(true),
//!         ..Repository::default()
//!     },
//! );
//! let created = client.send_blocking_detailed(&request)?.into_result()?;
//! println!("{}", created.display_name());
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`) and
//!   are accepted that way in paths
//! - Every list endpoint takes [`ListOptions`](super::ListOptions) and returns
//!   one [`Paginated`](super::Paginated) page

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::common::{decode, Outcome, Result};

pub mod commits;
pub mod deployments;
pub mod downloads;
pub mod issues;
pub mod pipelines;
pub mod projects;
pub mod pullrequests;
pub mod refs;
pub mod repositories;
pub mod source;
pub mod ssh;
pub mod users;
pub mod webhooks;
pub mod workspaces;

/// A documented success status with a JSON body.
pub(crate) fn ok<T: DeserializeOwned>(content: &[u8]) -> Result<Option<Outcome<T>>> {
    Ok(Some(Outcome::Success(decode(content)?)))
}

/// A documented success status without a body.
pub(crate) fn done() -> Result<Option<Outcome<()>>> {
    Ok(Some(Outcome::Success(())))
}

/// A documented error status.
pub(crate) fn failed<T>(status: StatusCode, content: &[u8]) -> Result<Option<Outcome<T>>> {
    Ok(Some(Outcome::failure(status, content)))
}
