//
//  bitbucket-api
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{collect_pages, list_options, GlobalOptions};
use crate::api::cloud::repositories::{GetRepository, ListWorkspaceRepositories};
use crate::models::RepositoryRole;

/// Manage repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories in a workspace
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a repository
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Workspace slug or UUID (defaults to --workspace)
    pub workspace: Option<String>,

    /// Only repositories you have this role on
    #[arg(long, value_parser = ["member", "contributor", "admin", "owner"])]
    pub role: Option<String>,

    /// Filter expression, e.g. 'language="rust"'
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Sort field; prefix with - for descending
    #[arg(long, default_value = "-updated_on")]
    pub sort: String,

    /// Maximum number of repositories to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::List(args) => list(args, global).await,
            RepoSubcommand::View(args) => view(args, global).await,
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let workspace = match &args.workspace {
        Some(workspace) => workspace.clone(),
        None => global.workspace()?,
    };
    let client = global.client()?;

    let mut options = list_options(args.limit).sort(args.sort.as_str());
    if let Some(q) = &args.query {
        options = options.q(q.as_str());
    }
    let mut request = ListWorkspaceRepositories::new(workspace).options(options);
    if let Some(role) = &args.role {
        request = request.role(parse_role(role)?);
    }

    let page = client.send_detailed(&request).await?.into_result()?;
    let repos = collect_pages(&client, page, args.limit).await?;
    global.output().write_list(&repos)
}

fn parse_role(role: &str) -> Result<RepositoryRole> {
    Ok(match role {
        "member" => RepositoryRole::Member,
        "contributor" => RepositoryRole::Contributor,
        "admin" => RepositoryRole::Admin,
        "owner" => RepositoryRole::Owner,
        other => anyhow::bail!("Unknown role: {}", other),
    })
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.client()?;
    let repo = client
        .send_detailed(&GetRepository::new(ctx.workspace, ctx.repo_slug))
        .await?
        .into_result()?;
    global.output().write(&repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin").unwrap(), RepositoryRole::Admin);
        assert!(parse_role("root").is_err());
    }
}
