//
//  bitbucket-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud API Library
//!
//! A typed client for the Bitbucket Cloud REST API 2.0.
//!
//! ## Overview
//!
//! Every API operation is a small struct implementing [`api::Endpoint`]. A
//! shared [`api::Client`] sends it four ways: async or blocking, and either
//! the full [`api::Response`] envelope or just the decoded body.
//!
//! ## Features
//!
//! - **Endpoints**: repositories, refs, commits, source, pull requests,
//!   issues, pipelines, deployments, downloads, webhooks, projects,
//!   workspaces, users and SSH keys
//! - **Models**: serde mirrors of the API schemas that keep unknown fields
//! - **Credentials**: bearer tokens, OAuth access tokens and app passwords,
//!   optionally kept in the system keychain
//! - **Configuration**: a TOML file for client settings and defaults
//!
//! ## Module Structure
//!
//! - [`api`]: the client, envelope, request parts and endpoint catalogue
//! - [`models`]: request and response bodies
//! - [`auth`]: credentials and keychain storage
//! - [`config`]: configuration file management
//! - [`context`]: repository argument parsing
//! - [`output`]: table and JSON output for the `bb-api` binary
//! - [`cli`]: the `bb-api` command definitions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::repositories::GetRepository;
//! use bitbucket_api::api::Client;
//! use bitbucket_api::auth::AuthCredential;
//!
//! # fn main() -> bitbucket_api::api::common::Result<()> {
//! let client = Client::cloud()?.with_auth(AuthCredential::bearer("your-token"));
//!
//! let response = client.send_blocking_detailed(&GetRepository::new("atlassian", "python-bitbucket"))?;
//! println!("HTTP {}", response.status_code);
//!
//! let repo = response.into_result()?;
//! println!("{}", repo.full_name.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `bb-api` commands, arguments, and subcommands defined using
/// the clap derive API.
pub mod cli;

/// API client for Bitbucket Cloud.
///
/// The client handles authentication, request building, status dispatch and
/// error mapping. Endpoints live in [`api::cloud`].
pub mod api;

/// Authentication and credential management.
///
/// - Bearer tokens with a configurable header and prefix
/// - OAuth 2.0 access tokens
/// - App passwords (HTTP Basic)
/// - Secure credential storage via system keychain
pub mod auth;

/// Configuration file management.
///
/// The configuration is stored in platform-specific locations:
/// - Linux: `~/.config/bb-api/config.toml`
/// - macOS: `~/Library/Application Support/bb-api/config.toml`
/// - Windows: `%APPDATA%\bb-api\config.toml`
///
/// `BB_API_CONFIG` overrides the path.
pub mod config;

/// Repository arguments: `workspace/repo`, bare slugs and clone URLs.
pub mod context;

/// Data models for API requests and responses.
pub mod models;

/// Output formatting for the binary.
///
/// - Table format: Human-readable tables for interactive use
/// - JSON format: Structured output for scripting and automation
pub mod output;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the shared client.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::Client;
///
/// let client = Client::new("https://api.bitbucket.org/2.0").unwrap();
/// assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
/// ```
pub use api::Client;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_api::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// if let Some(workspace) = config.get("defaults.workspace") {
///     println!("Default workspace: {}", workspace);
/// }
/// ```
pub use config::Config;

/// Re-export of the repository context struct.
pub use context::RepoContext;

/// Application name constant.
///
/// The name of the binary, used in the user agent and configuration paths.
///
/// # Value
///
/// `"bb-api"`
pub const APP_NAME: &str = "bb-api";

/// Application version constant.
///
/// Derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::VERSION;
///
/// println!("bb-api version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the binary.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_api::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// clap exits with this code on its own.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// No credential was available, or the API answered 401.
    /// Run `bb-api auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The API answered 404 or 410.
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded.
    ///
    /// The API answered 429. Wait before retrying.
    pub const RATE_LIMIT: i32 = 32;
}
