//
//  bitbucket-api
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Context Module
//!
//! Turns what a user types for a repository (`ws/repo`, a web URL or a clone
//! URL) into the workspace and slug the endpoints need.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_api::context::ContextResolver;
//!
//! let resolver = ContextResolver::new(Some("acme".to_string()));
//!
//! let ctx = resolver.resolve(Some("git@bitbucket.org:atlassian/stash.git")).unwrap();
//! assert_eq!(ctx.full_name(), "atlassian/stash");
//!
//! // A bare slug uses the default workspace
//! let ctx = resolver.resolve(Some("billing")).unwrap();
//! assert_eq!(ctx.full_name(), "acme/billing");
//! ```

mod resolver;

pub use resolver::*;

use crate::config::BITBUCKET_WEB_HOST;

/// A resolved repository.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::context::RepoContext;
///
/// let ctx = RepoContext::new("myworkspace", "my-repo");
/// assert_eq!(ctx.full_name(), "myworkspace/my-repo");
/// assert_eq!(ctx.web_url(), "https://bitbucket.org/myworkspace/my-repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    /// Web host the repository was named with, e.g. `bitbucket.org`.
    pub host: String,
    pub workspace: String,
    pub repo_slug: String,
}

impl RepoContext {
    /// A Bitbucket Cloud repository.
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            host: BITBUCKET_WEB_HOST.to_string(),
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
        }
    }

    /// `workspace/repo_slug`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.workspace, self.repo_slug)
    }

    /// The repository's page in a browser.
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.workspace, self.repo_slug)
    }
}

impl std::fmt::Display for RepoContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.workspace, self.repo_slug)
    }
}
