//
//  bitbucket-api
//  cli/workspace.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{collect_pages, list_options, GlobalOptions};
use crate::api::cloud::workspaces::{GetWorkspace, ListWorkspaces};

/// Manage workspaces
#[derive(Args, Debug)]
pub struct WorkspaceCommand {
    #[command(subcommand)]
    pub command: WorkspaceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceSubcommand {
    /// List workspaces you can access
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a workspace
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only workspaces where you have this role
    #[arg(long, value_parser = ["owner", "collaborator", "member"])]
    pub role: Option<String>,

    /// Maximum number of workspaces to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Workspace slug or UUID (defaults to --workspace)
    pub workspace: Option<String>,
}

impl WorkspaceCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            WorkspaceSubcommand::List(args) => list(args, global).await,
            WorkspaceSubcommand::View(args) => view(args, global).await,
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.authenticated_client()?;

    let mut request = ListWorkspaces::new().options(list_options(args.limit));
    if let Some(role) = &args.role {
        request = request.role(role.as_str());
    }
    let page = client.send_detailed(&request).await?.into_result()?;
    let workspaces = collect_pages(&client, page, args.limit).await?;
    global.output().write_list(&workspaces)
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let slug = match &args.workspace {
        Some(workspace) => workspace.clone(),
        None => global.workspace()?,
    };
    let client = global.client()?;
    let workspace = client
        .send_detailed(&GetWorkspace::new(slug))
        .await?
        .into_result()?;
    global.output().write(&workspace)
}
