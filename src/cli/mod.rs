//
//  bitbucket-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod config;
mod issue;
mod pipeline;
mod pr;
mod repo;
mod workspace;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use config::ConfigCommand;
pub use issue::IssueCommand;
pub use pipeline::PipelineCommand;
pub use pr::PrCommand;
pub use repo::RepoCommand;
pub use workspace::WorkspaceCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use crate::api::common::NextPage;
use crate::api::{ApiError, Client, ListOptions, Paginated};
use crate::auth::{AuthCredential, KeyringStore};
use crate::config::Config;
use crate::context::{ContextResolver, RepoContext};
use crate::exit_codes;
use crate::output::OutputWriter;

/// bb-api - Call the Bitbucket Cloud REST API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bb-api",
    version,
    about = "Call the Bitbucket Cloud REST API from the command line",
    long_about = "bb-api is a thin front end over the bitbucket-api library.\n\n\
                  It sends raw API requests and covers the common repository, pull request,\n\
                  issue and pipeline operations.",
    propagate_version = true,
    after_help = "Use 'bb-api <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API base URL (defaults to https://api.bitbucket.org/2.0)
    #[arg(long, global = true, env = "BB_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Access token, used instead of the stored credential
    #[arg(long, global = true, env = "BB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Workspace for bare repository slugs
    #[arg(long, short = 'w', global = true, env = "BB_WORKSPACE")]
    pub workspace: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with Bitbucket
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Manage repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Manage pull requests
    Pr(PrCommand),

    /// Manage issues
    Issue(IssueCommand),

    /// Manage pipelines
    Pipeline(PipelineCommand),

    /// Manage workspaces
    #[command(visible_alias = "ws")]
    Workspace(WorkspaceCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

impl GlobalOptions {
    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }

    /// The configuration file with `--base-url` applied on top.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(base_url) = &self.base_url {
            config.set("client.base_url", base_url)?;
        }
        Ok(config)
    }

    /// `--token`, or the credential stored for the configured host.
    pub fn credential(&self, config: &Config) -> Option<AuthCredential> {
        if let Some(token) = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return Some(AuthCredential::bearer(token));
        }
        match KeyringStore::new().credential(&config.host()) {
            Ok(credential) => credential,
            Err(e) => {
                tracing::debug!("Keyring unavailable: {e:#}");
                None
            }
        }
    }

    /// A client with credentials attached when any are available.
    pub fn client(&self) -> Result<Client> {
        let config = self.config()?;
        let client = config.client()?;
        Ok(match self.credential(&config) {
            Some(credential) => client.with_auth(credential),
            None => client,
        })
    }

    /// Like [`GlobalOptions::client`], but fails without credentials.
    pub fn authenticated_client(&self) -> Result<Client> {
        let client = self.client()?;
        if client.auth().is_none() {
            return Err(ApiError::AuthRequired.into());
        }
        Ok(client)
    }

    pub fn resolver(&self) -> Result<ContextResolver> {
        let workspace = match &self.workspace {
            Some(workspace) => Some(workspace.clone()),
            None => Config::load()?.defaults.workspace,
        };
        Ok(ContextResolver::new(workspace))
    }

    pub fn resolve_repo(&self, repo: Option<&str>) -> Result<RepoContext> {
        self.resolver()?.resolve(repo)
    }

    /// `--workspace`, then the configured default.
    pub fn workspace(&self) -> Result<String> {
        if let Some(workspace) = &self.workspace {
            return Ok(workspace.clone());
        }
        Config::load()?.defaults.workspace.ok_or_else(|| {
            anyhow::anyhow!(
                "No workspace given. Pass one, use --workspace or `bb-api config set defaults.workspace <name>`."
            )
        })
    }
}

/// List options asking for pages of up to `limit` items.
pub(crate) fn list_options(limit: usize) -> ListOptions {
    ListOptions::new().pagelen(limit.clamp(1, 50) as u32)
}

/// Follows `next` links from `page` until `limit` items are collected.
pub(crate) async fn collect_pages<T: DeserializeOwned>(
    client: &Client,
    mut page: Paginated<T>,
    limit: usize,
) -> Result<Vec<T>> {
    let mut items = std::mem::take(&mut page.values);
    while items.len() < limit {
        let Some(next) = NextPage::from_page(&page) else {
            break;
        };
        page = client.send_detailed(&next).await?.into_result()?;
        items.append(&mut page.values);
    }
    items.truncate(limit);
    Ok(items)
}

/// Maps an error onto the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::AuthRequired | ApiError::AuthFailed(_)) => exit_codes::AUTH_ERROR,
        Some(ApiError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(ApiError::RateLimited) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&ApiError::AuthRequired.into()), exit_codes::AUTH_ERROR);
        assert_eq!(
            exit_code(&ApiError::NotFound("gone".into()).into()),
            exit_codes::NOT_FOUND
        );
        assert_eq!(exit_code(&ApiError::RateLimited.into()), exit_codes::RATE_LIMIT);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), exit_codes::ERROR);
    }

    #[test]
    fn test_list_options_cap_page_length() {
        assert_eq!(list_options(30).pagelen, Some(30));
        assert_eq!(list_options(500).pagelen, Some(50));
        assert_eq!(list_options(0).pagelen, Some(1));
    }

    #[test]
    fn test_token_flag_wins() {
        let global = GlobalOptions {
            token: Some("abc ".to_string()),
            ..GlobalOptions::default()
        };
        assert_eq!(
            global.credential(&Config::default()),
            Some(AuthCredential::bearer("abc"))
        );
    }
}
