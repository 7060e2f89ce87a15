//
//  bitbucket-api
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{collect_pages, list_options, GlobalOptions};
use crate::api::cloud::pullrequests::{
    ApprovePullRequest, DeclinePullRequest, GetPullRequest, ListPullRequests, MergePullRequest,
};
use crate::models::{MergeParameters, MergeStrategy, PullRequestMerge, PullRequestState};
use crate::output::write_json;

/// Manage pull requests
#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a pull request
    View(PrArgs),

    /// Merge a pull request
    Merge(MergeArgs),

    /// Approve a pull request
    Approve(PrArgs),

    /// Decline a pull request
    #[command(visible_alias = "close")]
    Decline(PrArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,

    /// Filter by state (repeatable; defaults to open)
    #[arg(
        long,
        short = 's',
        action = clap::ArgAction::Append,
        value_parser = ["open", "merged", "declined", "superseded"]
    )]
    pub state: Vec<String>,

    /// Maximum number of PRs to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct PrArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,

    /// Pull request number
    pub number: u64,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub pr: PrArgs,

    /// Merge strategy
    #[arg(
        long,
        value_parser = [
            "merge_commit", "squash", "fast_forward",
            "squash_fast_forward", "rebase_fast_forward", "rebase_merge"
        ]
    )]
    pub strategy: Option<String>,

    /// Merge commit message
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Delete the source branch after merging
    #[arg(long, short = 'd')]
    pub delete_branch: bool,

    /// Queue the merge and return without waiting for it
    #[arg(long = "async")]
    pub async_merge: bool,
}

impl PrCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PrSubcommand::List(args) => list(args, global).await,
            PrSubcommand::View(args) => view(args, global).await,
            PrSubcommand::Merge(args) => merge(args, global).await,
            PrSubcommand::Approve(args) => approve(args, global).await,
            PrSubcommand::Decline(args) => decline(args, global).await,
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.client()?;

    let mut request =
        ListPullRequests::new(&ctx.workspace, &ctx.repo_slug).options(list_options(args.limit));
    for state in &args.state {
        request = request.state(state.parse::<PullRequestState>().map_err(anyhow::Error::msg)?);
    }

    let page = client.send_detailed(&request).await?.into_result()?;
    let prs = collect_pages(&client, page, args.limit).await?;
    global.output().write_list(&prs)
}

async fn view(args: &PrArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.client()?;
    let pr = client
        .send_detailed(&GetPullRequest::new(ctx.workspace, ctx.repo_slug, args.number))
        .await?
        .into_result()?;
    global.output().write(&pr)
}

fn merge_parameters(args: &MergeArgs) -> Result<Option<MergeParameters>> {
    let merge_strategy = args
        .strategy
        .as_deref()
        .map(str::parse::<MergeStrategy>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    if merge_strategy.is_none() && args.message.is_none() && !args.delete_branch {
        return Ok(None);
    }
    Ok(Some(MergeParameters {
        message: args.message.clone(),
        close_source_branch: args.delete_branch.then_some(true),
        merge_strategy,
        ..MergeParameters::default()
    }))
}

async fn merge(args: &MergeArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.pr.repo))?;
    let client = global.authenticated_client()?;
    let output = global.output();

    let mut request = MergePullRequest::new(&ctx.workspace, &ctx.repo_slug, args.pr.number);
    if let Some(parameters) = merge_parameters(args)? {
        request = request.parameters(parameters);
    }
    if args.async_merge {
        request = request.async_merge(true);
    }

    match client.send_detailed(&request).await?.into_result()? {
        PullRequestMerge::Merged(pr) => {
            if global.json {
                return write_json(&pr);
            }
            output.write_success(&format!(
                "Merged pull request #{} into {}",
                args.pr.number,
                pr.destination_branch().unwrap_or("its destination")
            ));
        }
        PullRequestMerge::Queued(task) => {
            if global.json {
                return write_json(&task);
            }
            output.write_info(&format!("Merge of #{} queued", args.pr.number));
            if let Some(url) = task.poll_url() {
                output.write_info(&format!("Poll {} for the result", url));
            }
        }
    }
    Ok(())
}

async fn approve(args: &PrArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.authenticated_client()?;
    let participant = client
        .send_detailed(&ApprovePullRequest::new(ctx.workspace, ctx.repo_slug, args.number))
        .await?
        .into_result()?;
    if global.json {
        return write_json(&participant);
    }
    global
        .output()
        .write_success(&format!("Approved pull request #{}", args.number));
    Ok(())
}

async fn decline(args: &PrArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.authenticated_client()?;
    let pr = client
        .send_detailed(&DeclinePullRequest::new(ctx.workspace, ctx.repo_slug, args.number))
        .await?
        .into_result()?;
    if global.json {
        return write_json(&pr);
    }
    global
        .output()
        .write_success(&format!("Declined pull request #{}", args.number));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge_args() -> MergeArgs {
        MergeArgs {
            pr: PrArgs {
                repo: "ws/repo".to_string(),
                number: 1,
            },
            strategy: None,
            message: None,
            delete_branch: false,
            async_merge: false,
        }
    }

    #[test]
    fn test_merge_without_options_sends_no_body() {
        assert_eq!(merge_parameters(&merge_args()).unwrap(), None);
    }

    #[test]
    fn test_merge_parameters() {
        let mut args = merge_args();
        args.strategy = Some("squash".to_string());
        args.delete_branch = true;

        let params = merge_parameters(&args).unwrap().unwrap();
        assert_eq!(params.merge_strategy, Some(MergeStrategy::Squash));
        assert_eq!(params.close_source_branch, Some(true));
        assert_eq!(params.message, None);
    }
}
