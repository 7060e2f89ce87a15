//
//  bitbucket-api
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Argument Resolution
//!
//! ## Supported Formats
//!
//! | Format | Example |
//! |--------|---------|
//! | Full name | `workspace/repo` |
//! | Slug | `repo` (needs a default workspace) |
//! | HTTPS | `https://bitbucket.org/workspace/repo` (`.git` optional) |
//! | SSH | `git@bitbucket.org:workspace/repo.git` |
//! | SSH URL | `ssh://git@bitbucket.org/workspace/repo.git` |

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use super::RepoContext;
use crate::config::BITBUCKET_WEB_HOST;

/// `git@host:workspace/repo(.git)` and `ssh://git@host/workspace/repo(.git)`.
static SSH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:ssh://)?git@([^:/]+)(?::\d+)?[:/]([^/]+)/([^/]+?)(?:\.git)?/?$").unwrap()
});

/// `https://host/workspace/repo(.git)`, optionally followed by a web path
/// such as `/pull-requests/1`.
static HTTPS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:[^@/]+@)?([^/]+)/([^/]+)/([^/]+?)(?:\.git)?(?:/.*)?$").unwrap()
});

static FULL_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_.{}-]+)/([A-Za-z0-9_.-]+)$").unwrap());

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Resolves repository arguments, filling in a default workspace.
#[derive(Debug, Clone, Default)]
pub struct ContextResolver {
    default_workspace: Option<String>,
}

impl ContextResolver {
    pub fn new(default_workspace: Option<String>) -> Self {
        Self { default_workspace }
    }

    /// Resolves a repository argument.
    ///
    /// # Errors
    ///
    /// Fails when no repository is given, when a bare slug is given without a
    /// default workspace, or when the argument matches no known format.
    pub fn resolve(&self, repo: Option<&str>) -> Result<RepoContext> {
        let Some(repo) = repo.map(str::trim).filter(|r| !r.is_empty()) else {
            anyhow::bail!("No repository given. Pass WORKSPACE/REPO or a repository URL.");
        };

        if let Some(ctx) = Self::parse_remote_url(repo) {
            return Ok(ctx);
        }

        if let Some(caps) = FULL_NAME_PATTERN.captures(repo) {
            return Ok(RepoContext::new(&caps[1], &caps[2]));
        }

        if SLUG_PATTERN.is_match(repo) {
            return match &self.default_workspace {
                Some(workspace) => Ok(RepoContext::new(workspace.as_str(), repo)),
                None => anyhow::bail!(
                    "No workspace for '{}'. Use WORKSPACE/REPO, --workspace or `bb-api config set defaults.workspace <name>`.",
                    repo
                ),
            };
        }

        anyhow::bail!(
            "Invalid repository '{}'. Expected WORKSPACE/REPO or a repository URL.",
            repo
        )
    }

    /// Parses a web or clone URL. Returns `None` for anything that is not a
    /// URL of a known shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_api::context::ContextResolver;
    ///
    /// let ctx = ContextResolver::parse_remote_url("https://bitbucket.org/ws/repo.git").unwrap();
    /// assert_eq!(ctx.workspace, "ws");
    /// assert_eq!(ctx.repo_slug, "repo");
    /// assert!(ContextResolver::parse_remote_url("ws/repo").is_none());
    /// ```
    pub fn parse_remote_url(url: &str) -> Option<RepoContext> {
        let caps = SSH_PATTERN
            .captures(url)
            .or_else(|| HTTPS_PATTERN.captures(url))?;
        let host = caps[1].to_lowercase();
        Some(RepoContext {
            host: if host == "www.bitbucket.org" {
                BITBUCKET_WEB_HOST.to_string()
            } else {
                host
            },
            workspace: caps[2].to_string(),
            repo_slug: caps[3].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh() {
        let ctx = ContextResolver::parse_remote_url("git@bitbucket.org:workspace/repo.git").unwrap();
        assert_eq!(ctx.host, "bitbucket.org");
        assert_eq!(ctx.full_name(), "workspace/repo");

        let ctx =
            ContextResolver::parse_remote_url("ssh://git@bitbucket.org/workspace/repo.git").unwrap();
        assert_eq!(ctx.full_name(), "workspace/repo");
    }

    #[test]
    fn test_parse_https() {
        let ctx = ContextResolver::parse_remote_url("https://bitbucket.org/workspace/repo").unwrap();
        assert_eq!(ctx.full_name(), "workspace/repo");

        let ctx = ContextResolver::parse_remote_url(
            "https://jdoe@bitbucket.org/workspace/repo.git",
        )
        .unwrap();
        assert_eq!(ctx.full_name(), "workspace/repo");

        let ctx = ContextResolver::parse_remote_url(
            "https://bitbucket.org/workspace/repo/pull-requests/12",
        )
        .unwrap();
        assert_eq!(ctx.full_name(), "workspace/repo");
    }

    #[test]
    fn test_resolve_full_name_and_slug() {
        let resolver = ContextResolver::new(Some("acme".to_string()));
        assert_eq!(
            resolver.resolve(Some("ws/repo")).unwrap(),
            RepoContext::new("ws", "repo")
        );
        assert_eq!(
            resolver.resolve(Some("repo")).unwrap(),
            RepoContext::new("acme", "repo")
        );
    }

    #[test]
    fn test_resolve_errors() {
        let resolver = ContextResolver::default();
        assert!(resolver.resolve(None).is_err());
        assert!(resolver.resolve(Some("  ")).is_err());
        assert!(resolver.resolve(Some("repo")).is_err());
        assert!(resolver.resolve(Some("a/b/c")).is_err());
    }
}
