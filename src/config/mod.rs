//
//  bitbucket-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the shared [`Client`] and defaults for the `bb-api` binary,
//! stored as TOML.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bb-api/config.toml`
//! - **macOS**: `~/Library/Application Support/bb-api/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bb-api\config.toml`
//!
//! `BB_API_CONFIG` overrides the location.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [client]
//! base_url = "https://api.bitbucket.org/2.0"
//! timeout_secs = 30
//! verify_ssl = true
//! follow_redirects = false
//! raise_on_unexpected_status = true
//!
//! [client.headers]
//! X-Request-Source = "ci"
//!
//! [defaults]
//! workspace = "acme"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_api::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("defaults.workspace", "acme")?;
//! config.save()?;
//!
//! let client = config.client()?;
//! println!("talking to {}", client.base_url());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::Client;

/// Environment variable that overrides the configuration file path.
pub const CONFIG_PATH_ENV: &str = "BB_API_CONFIG";

/// Scalar keys understood by [`Config::get`] and [`Config::set`].
///
/// `client.headers.<name>` and `client.cookies.<name>` are accepted as well.
pub const KNOWN_KEYS: &[&str] = &[
    "client.base_url",
    "client.timeout_secs",
    "client.verify_ssl",
    "client.follow_redirects",
    "client.raise_on_unexpected_status",
    "defaults.workspace",
    "defaults.user",
];

/// The configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub defaults: Defaults,
}

/// How the shared client is built.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `base_url` | Bitbucket Cloud |
/// | `timeout_secs` | none |
/// | `verify_ssl` | `true` |
/// | `follow_redirects` | `false` |
/// | `raise_on_unexpected_status` | `false` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    pub verify_ssl: bool,

    pub follow_redirects: bool,

    pub raise_on_unexpected_status: bool,

    /// Sent with every request.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Sent with every request in a single `Cookie` header.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: BTreeMap<String, String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: None,
            verify_ssl: true,
            follow_redirects: false,
            raise_on_unexpected_status: false,
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
        }
    }
}

/// Defaults for commands that take a workspace or user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        match read_config_file(path)? {
            Some(content) => toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Where the configuration file lives.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The API base URL, falling back to Bitbucket Cloud.
    pub fn base_url(&self) -> &str {
        self.client.base_url.as_deref().unwrap_or(BITBUCKET_API_URL)
    }

    /// The keyring key for the configured API.
    pub fn host(&self) -> String {
        normalize_host(self.base_url())
    }

    /// Builds a [`Client`] from the `[client]` section. No credentials are
    /// attached.
    ///
    /// # Errors
    ///
    /// Fails if the base URL is not a valid URL.
    pub fn client(&self) -> Result<Client> {
        let settings = &self.client;
        let mut client = Client::new(self.base_url())?
            .with_verify_ssl(settings.verify_ssl)
            .with_follow_redirects(settings.follow_redirects)
            .with_raise_on_unexpected_status(settings.raise_on_unexpected_status)
            .with_headers(settings.headers.clone())
            .with_cookies(settings.cookies.clone());
        if let Some(secs) = settings.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }

    /// Gets a value by dotted key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_api::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("client.verify_ssl"), Some("true".to_string()));
    /// assert_eq!(config.get("defaults.workspace"), None);
    /// assert_eq!(config.get("unknown"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        let settings = &self.client;
        match key {
            "client.base_url" => settings.base_url.clone(),
            "client.timeout_secs" => settings.timeout_secs.map(|t| t.to_string()),
            "client.verify_ssl" => Some(settings.verify_ssl.to_string()),
            "client.follow_redirects" => Some(settings.follow_redirects.to_string()),
            "client.raise_on_unexpected_status" => {
                Some(settings.raise_on_unexpected_status.to_string())
            }
            "defaults.workspace" => self.defaults.workspace.clone(),
            "defaults.user" => self.defaults.user.clone(),
            _ => {
                if let Some(name) = key.strip_prefix("client.headers.") {
                    settings.headers.get(name).cloned()
                } else if let Some(name) = key.strip_prefix("client.cookies.") {
                    settings.cookies.get(name).cloned()
                } else {
                    None
                }
            }
        }
    }

    /// Sets a value by dotted key, validating it.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys, malformed numbers or booleans, and base URLs
    /// that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let settings = &mut self.client;
        match key {
            "client.base_url" => {
                let url = url::Url::parse(value)
                    .with_context(|| format!("Invalid base URL: {}", value))?;
                if !matches!(url.scheme(), "http" | "https") {
                    bail!("Base URL must use http or https: {}", value);
                }
                settings.base_url = Some(value.trim_end_matches('/').to_string());
            }
            "client.timeout_secs" => {
                settings.timeout_secs = Some(
                    value
                        .parse()
                        .with_context(|| format!("Expected a number of seconds, got '{}'", value))?,
                );
            }
            "client.verify_ssl" => settings.verify_ssl = parse_bool(value)?,
            "client.follow_redirects" => settings.follow_redirects = parse_bool(value)?,
            "client.raise_on_unexpected_status" => {
                settings.raise_on_unexpected_status = parse_bool(value)?
            }
            "defaults.workspace" => self.defaults.workspace = Some(value.to_string()),
            "defaults.user" => self.defaults.user = Some(value.to_string()),
            _ => {
                if let Some(name) = key.strip_prefix("client.headers.").filter(|n| !n.is_empty()) {
                    settings.headers.insert(name.to_string(), value.to_string());
                } else if let Some(name) =
                    key.strip_prefix("client.cookies.").filter(|n| !n.is_empty())
                {
                    settings.cookies.insert(name.to_string(), value.to_string());
                } else {
                    bail!("Unknown configuration key: {}", key);
                }
            }
        }
        Ok(())
    }

    /// Every key that currently has a value, in display order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = KNOWN_KEYS
            .iter()
            .filter(|key| self.get(key).is_some())
            .map(|key| key.to_string())
            .collect();
        keys.extend(
            self.client
                .headers
                .keys()
                .map(|name| format!("client.headers.{}", name)),
        );
        keys.extend(
            self.client
                .cookies
                .keys()
                .map(|name| format!("client.cookies.{}", name)),
        );
        keys
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!("Expected true or false, got '{}'", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url(), BITBUCKET_API_URL);
        assert_eq!(config.host(), "api.bitbucket.org");
        assert!(config.client.verify_ssl);
        assert!(!config.client.follow_redirects);
    }

    #[test]
    fn test_set_validates() {
        let mut config = Config::default();
        assert!(config.set("client.timeout_secs", "ten").is_err());
        assert!(config.set("client.verify_ssl", "maybe").is_err());
        assert!(config.set("client.base_url", "not a url").is_err());
        assert!(config.set("nope", "x").is_err());

        config.set("client.verify_ssl", "no").unwrap();
        config.set("client.base_url", "http://localhost:8080/2.0/").unwrap();
        config.set("client.headers.X-Trace", "1").unwrap();
        assert_eq!(config.get("client.verify_ssl").as_deref(), Some("false"));
        assert_eq!(
            config.get("client.base_url").as_deref(),
            Some("http://localhost:8080/2.0")
        );
        assert_eq!(config.get("client.headers.X-Trace").as_deref(), Some("1"));
        assert_eq!(config.host(), "localhost:8080");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set("defaults.workspace", "acme").unwrap();
        config.set("client.timeout_secs", "15").unwrap();
        config.set("client.cookies.session", "abc").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.keys(),
            vec![
                "client.timeout_secs",
                "client.verify_ssl",
                "client.follow_redirects",
                "client.raise_on_unexpected_status",
                "defaults.workspace",
                "client.cookies.session",
            ]
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\nfollow_redirects = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.client.follow_redirects);
        assert!(config.client.verify_ssl);
    }

    #[test]
    fn test_client_from_settings() {
        let mut config = Config::default();
        config.set("client.timeout_secs", "5").unwrap();
        config.set("client.raise_on_unexpected_status", "true").unwrap();

        let client = config.client().unwrap();
        assert_eq!(client.base_url(), BITBUCKET_API_URL);
        assert_eq!(client.timeout(), Some(Duration::from_secs(5)));
        assert!(client.raise_on_unexpected_status());
    }
}
