//
//  bitbucket-api
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Credentials are checked against `GET /user` and kept in the system keyring,
//! keyed by the API host from the configuration.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use dialoguer::Password;

use crate::api::cloud::users::GetCurrentUser;
use crate::api::Client;
use crate::auth::{read_token_from_stdin, validate_token, AuthCredential, KeyringStore};
use crate::config::Config;
use crate::models::Account;

use super::GlobalOptions;

/// Authenticate with Bitbucket
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a credential for the configured API host
    Login(LoginArgs),

    /// Remove the stored credential
    Logout,

    /// Show which credential is in use and whom it belongs to
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the access token (or app password) from standard input
    #[arg(long)]
    pub with_token: bool,

    /// Log in with an app password for this username instead of a token
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status => status(global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let host = config.host();

    let secret = if args.with_token {
        read_token_from_stdin()?
    } else if args.username.is_some() {
        Password::new()
            .with_prompt("App password")
            .interact()
            .context("Failed to read app password")?
    } else {
        Password::new()
            .with_prompt(format!("Access token for {}", host))
            .interact()
            .context("Failed to read token")?
    };

    let credential = match &args.username {
        Some(username) => {
            if secret.is_empty() {
                bail!("App password must not be empty");
            }
            AuthCredential::app_password(username.as_str(), secret)
        }
        None => {
            if !validate_token(&secret) {
                bail!("Invalid token format");
            }
            AuthCredential::bearer(secret)
        }
    };

    let account = current_user(&config.client()?.with_auth(credential.clone())).await?;

    KeyringStore::new()
        .store_credential(&host, &credential)
        .context("Failed to store credential in the keyring")?;

    let output = global.output();
    output.write_success(&format!("Logged in to {} as {}", host, account.name()));

    if config.defaults.user.is_none() {
        // Remember who we are for commands that take a user.
        let mut stored = Config::load()?;
        stored.defaults.user = account.uuid.clone().or_else(|| account.nickname.clone());
        stored.save()?;
    }
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let host = global.config()?.host();
    KeyringStore::new().delete(&host)?;
    global
        .output()
        .write_success(&format!("Logged out of {}", host));
    Ok(())
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let host = config.host();
    let output = global.output();

    let Some(credential) = global.credential(&config) else {
        output.write_info(&format!("Not logged in to {}", host));
        output.write_info("Run `bb-api auth login` to authenticate.");
        return Err(crate::api::ApiError::AuthRequired.into());
    };

    let source = if global.token.is_some() {
        "--token"
    } else {
        "keyring"
    };
    if credential.is_expired() {
        output.write_warning("The stored OAuth token has expired");
    }

    let account = current_user(&config.client()?.with_auth(credential.clone())).await?;

    if global.json {
        return crate::output::write_json(&serde_json::json!({
            "host": host,
            "kind": credential.kind(),
            "source": source,
            "user": account,
        }));
    }

    output.write_success(&format!(
        "Logged in to {} as {} ({}, from {})",
        host,
        account.name(),
        credential.kind(),
        source
    ));
    Ok(())
}

/// Calls `GET /user` with the given client.
async fn current_user(client: &Client) -> Result<Account> {
    tracing::debug!("Validating credential against {}", client.base_url());
    Ok(client.send_detailed(&GetCurrentUser).await?.into_result()?)
}
