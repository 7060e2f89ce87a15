//
//  bitbucket-api
//  cli/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline commands.
//!
//! A pipeline is addressed by its UUID (`{...}`) or its build number; the API
//! accepts either in the path.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use super::{collect_pages, list_options, GlobalOptions};
use crate::api::cloud::pipelines::{GetPipeline, ListPipelines, StopPipeline, TriggerPipeline};
use crate::models::{Pipeline, PipelineTarget, PipelineVariable};
use crate::output::write_json;

/// Manage pipelines
#[derive(Args, Debug)]
pub struct PipelineCommand {
    #[command(subcommand)]
    pub command: PipelineSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PipelineSubcommand {
    /// List recent pipeline runs
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a pipeline run
    View(PipelineArgs),

    /// Trigger a pipeline run
    Run(RunArgs),

    /// Stop a running pipeline
    Stop(PipelineArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,

    /// Maximum number of runs to list
    #[arg(long, short = 'L', default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,

    /// Pipeline UUID or build number
    pub pipeline: String,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Repository as WORKSPACE/REPO, a slug, or a repository URL
    pub repo: String,

    /// Branch to run on
    #[arg(long, short = 'b', conflicts_with = "commit")]
    pub branch: Option<String>,

    /// Commit hash to run on
    #[arg(long, short = 'c')]
    pub commit: Option<String>,

    /// Custom pipeline name from bitbucket-pipelines.yml
    #[arg(long)]
    pub custom: Option<String>,

    /// Pipeline variable KEY=VALUE (repeatable)
    #[arg(long = "var", action = clap::ArgAction::Append)]
    pub variables: Vec<String>,

    /// Secured pipeline variable KEY=VALUE (repeatable)
    #[arg(long = "secure-var", action = clap::ArgAction::Append)]
    pub secure_variables: Vec<String>,
}

impl PipelineCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PipelineSubcommand::List(args) => list(args, global).await,
            PipelineSubcommand::View(args) => view(args, global).await,
            PipelineSubcommand::Run(args) => run(args, global).await,
            PipelineSubcommand::Stop(args) => stop(args, global).await,
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.client()?;

    let request = ListPipelines::new(ctx.workspace, ctx.repo_slug)
        .options(list_options(args.limit).sort("-created_on"));
    let page = client.send_detailed(&request).await?.into_result()?;
    let pipelines = collect_pages(&client, page, args.limit).await?;
    global.output().write_list(&pipelines)
}

async fn view(args: &PipelineArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.client()?;
    let pipeline = client
        .send_detailed(&GetPipeline::new(ctx.workspace, ctx.repo_slug, args.pipeline.as_str()))
        .await?
        .into_result()?;
    global.output().write(&pipeline)
}

fn parse_variable(raw: &str, secured: bool) -> Result<PipelineVariable> {
    let Some((key, value)) = raw.split_once('=').filter(|(k, _)| !k.is_empty()) else {
        bail!("Invalid variable: {}. Expected KEY=VALUE", raw);
    };
    let variable = PipelineVariable::new(key, value);
    Ok(if secured { variable.secured() } else { variable })
}

/// The run request for the given flags.
fn trigger_request(workspace: &str, repo_slug: &str, args: &RunArgs) -> Result<TriggerPipeline> {
    let mut target = match (&args.branch, &args.commit) {
        (Some(branch), _) => PipelineTarget::branch(branch.as_str()),
        (None, Some(commit)) => PipelineTarget::commit(commit.as_str()),
        (None, None) => bail!("Pass --branch or --commit"),
    };
    if let Some(pattern) = &args.custom {
        target = target.with_custom_selector(pattern.as_str());
    }

    let mut request = TriggerPipeline::new(workspace, repo_slug, Pipeline::for_target(target));
    for raw in &args.variables {
        request = request.variable(parse_variable(raw, false)?);
    }
    for raw in &args.secure_variables {
        request = request.variable(parse_variable(raw, true)?);
    }
    Ok(request)
}

async fn run(args: &RunArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.authenticated_client()?;
    let request = trigger_request(&ctx.workspace, &ctx.repo_slug, args)?;

    let pipeline = client.send_detailed(&request).await?.into_result()?;
    if global.json {
        return write_json(&pipeline);
    }
    global.output().write_success(&format!(
        "Started pipeline #{} on {}",
        pipeline.build_number.unwrap_or_default(),
        ctx.full_name()
    ));
    Ok(())
}

async fn stop(args: &PipelineArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = global.resolve_repo(Some(&args.repo))?;
    let client = global.authenticated_client()?;
    client
        .send_detailed(&StopPipeline::new(&ctx.workspace, &ctx.repo_slug, args.pipeline.as_str()))
        .await?
        .into_result()?;
    global
        .output()
        .write_success(&format!("Stopped pipeline {}", args.pipeline));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, RequestBody};
    use serde_json::json;

    fn run_args() -> RunArgs {
        RunArgs {
            repo: "ws/repo".to_string(),
            branch: Some("main".to_string()),
            commit: None,
            custom: Some("deploy".to_string()),
            variables: vec!["ENV=prod".to_string()],
            secure_variables: vec!["TOKEN=s3cret".to_string()],
        }
    }

    #[test]
    fn test_trigger_request_body() {
        let request = trigger_request("ws", "repo", &run_args()).unwrap();
        let RequestBody::Json(body) = request.body().unwrap() else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["target"]["ref_name"], "main");
        assert_eq!(body["target"]["selector"], json!({"type": "custom", "pattern": "deploy"}));
        assert_eq!(body["variables"][0]["key"], "ENV");
        assert_eq!(body["variables"][1]["secured"], true);
    }

    #[test]
    fn test_trigger_needs_a_target() {
        let mut args = run_args();
        args.branch = None;
        assert!(trigger_request("ws", "repo", &args).is_err());
    }

    #[test]
    fn test_parse_variable() {
        assert!(parse_variable("novalue", false).is_err());
        assert!(parse_variable("=x", false).is_err());
        assert_eq!(parse_variable("A=b=c", false).unwrap().value.as_deref(), Some("b=c"));
    }
}
