//
//  bitbucket-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands
//!
//! Keys are dotted paths into the TOML file, e.g. `client.timeout_secs`,
//! `defaults.workspace` or `client.headers.X-Trace`.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::Config;
use crate::output::write_json;

use super::GlobalOptions;

/// Manage configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => path(),
        }
    }
}

fn get(args: &GetArgs) -> Result<()> {
    let config = Config::load()?;
    match config.get(&args.key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => bail!("No value set for '{}'", args.key),
    }
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;
    tracing::debug!("Saved {} to {}", args.key, Config::config_path()?.display());
    global
        .output()
        .write_success(&format!("Set {} to {}", args.key, args.value));
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let values: BTreeMap<String, String> = config
        .keys()
        .into_iter()
        .filter_map(|key| config.get(&key).map(|value| (key, value)))
        .collect();

    if global.json {
        return write_json(&values);
    }

    let color = global.output().color_enabled();
    for (key, value) in &values {
        if color {
            println!("{}={}", style(key).cyan(), value);
        } else {
            println!("{}={}", key, value);
        }
    }
    Ok(())
}

fn path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
