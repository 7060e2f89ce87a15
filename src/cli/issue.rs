//
//  bitbucket-api
//  cli/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{collect_pages, list_options, GlobalOptions};
use crate::api::cloud::issues::{GetIssue, ListIssues};
use crate::models::IssueState;

/// Manage issues
#[derive(Args, Debug)]
pub struct IssueCommand {
    #[command(subcommand)]
    pub command: IssueSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// List issues
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View an issue
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,

    /// Filter by state, e.g. new, open, resolved, "on hold"
    #[arg(long, short = 's')]
    pub state: Option<String>,

    /// Filter by assignee nickname
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Maximum number of issues to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,

    /// Issue number
    pub number: u64,
}

impl IssueCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            IssueSubcommand::List(args) => list(args, global).await,
            IssueSubcommand::View(args) => view(args, global).await,
        }
    }
}

/// Builds the `q` filter for the list flags.
fn issue_query(args: &ListArgs) -> Result<Option<String>> {
    let mut filters = Vec::new();
    if let Some(state) = &args.state {
        let state = state.parse::<IssueState>().map_err(anyhow::Error::msg)?;
        filters.push(format!("state=\"{}\"", state.as_str()));
    }
    if let Some(assignee) = &args.assignee {
        filters.push(format!("assignee.nickname=\"{}\"", assignee.replace('"', "\\\"")));
    }
    Ok((!filters.is_empty()).then(|| filters.join(" AND ")))
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.client()?;

    let mut options = list_options(args.limit).sort("-updated_on");
    if let Some(q) = issue_query(args)? {
        options = options.q(q);
    }
    let request = ListIssues::new(ctx.workspace, ctx.repo_slug).options(options);

    let page = client.send_detailed(&request).await?.into_result()?;
    let issues = collect_pages(&client, page, args.limit).await?;
    global.output().write_list(&issues)
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.client()?;
    let issue = client
        .send_detailed(&GetIssue::new(ctx.workspace, ctx.repo_slug, args.number))
        .await?
        .into_result()?;
    global.output().write(&issue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(state: Option<&str>, assignee: Option<&str>) -> ListArgs {
        ListArgs {
            repo: "ws/repo".to_string(),
            state: state.map(str::to_string),
            assignee: assignee.map(str::to_string),
            limit: 30,
        }
    }

    #[test]
    fn test_issue_query() {
        assert_eq!(issue_query(&args(None, None)).unwrap(), None);
        assert_eq!(
            issue_query(&args(Some("on hold"), Some("jdoe"))).unwrap(),
            Some("state=\"on hold\" AND assignee.nickname=\"jdoe\"".to_string())
        );
        assert!(issue_query(&args(Some("bogus"), None)).is_err());
    }
}
