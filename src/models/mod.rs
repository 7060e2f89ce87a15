//
//  bitbucket-api
//  models/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud Data Models
//!
//! Typed mirrors of the JSON schemas the Bitbucket Cloud API 2.0 sends and
//! accepts.
//!
//! ## Conventions
//!
//! - Nearly every field is an `Option`. A key missing from the JSON reads as
//!   `None`, and `None` fields are left out when serializing, so a model built
//!   with `..Default::default()` only sends the fields that were set.
//! - Top-level resources keep keys they do not know about in
//!   `additional_properties`, so a value read from the API serializes back
//!   without losing anything.
//! - The `type` discriminator Bitbucket puts on every object is exposed as
//!   `object_type`.
//! - Timestamps are [`chrono::DateTime<Utc>`].
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_api::models::{Model, Repository};
//!
//! let repo = Repository::from_value(serde_json::json!({
//!     "type": "repository",
//!     "full_name": "atlassian/python-bitbucket",
//!     "is_private": false,
//!     "mystery_field": 42
//! }))?;
//!
//! assert_eq!(repo.full_name.as_deref(), Some("atlassian/python-bitbucket"));
//! assert_eq!(repo.additional_properties["mystery_field"], 42);
//! assert_eq!(repo.to_value()?["mystery_field"], 42);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod account;
mod commit;
mod deployment;
mod download;
mod error;
mod issue;
mod pipeline;
mod pullrequest;
mod refs;
mod repository;
mod ssh_key;
mod webhook;
mod workspace;

pub use account::*;
pub use commit::*;
pub use deployment::*;
pub use download::*;
pub use error::*;
pub use issue::*;
pub use pipeline::*;
pub use pullrequest::*;
pub use refs::*;
pub use repository::*;
pub use ssh_key::*;
pub use webhook::*;
pub use workspace::*;

/// Unknown JSON keys kept on a model.
pub type AdditionalProperties = serde_json::Map<String, Value>;

/// Conversion between a model and a plain JSON value.
///
/// Implemented for every serde type; it exists so callers holding loosely
/// typed JSON (e.g. from a [`RawRequest`](crate::api::RawRequest)) can move
/// in and out of the typed models without naming `serde_json` functions.
pub trait Model: Serialize + DeserializeOwned {
    /// Serializes the model. `None` fields are omitted.
    fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Builds a model from a JSON value. Missing keys read as `None`.
    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl<T: Serialize + DeserializeOwned> Model for T {}

/// A hyperlink in a `links` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Set on clone links: `https` or `ssh`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One relation of a `links` object. Most relations hold a single link;
/// `clone` holds one per protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkSet {
    Many(Vec<Link>),
    One(Link),
}

impl LinkSet {
    /// All links of the relation.
    pub fn links(&self) -> &[Link] {
        match self {
            Self::One(link) => std::slice::from_ref(link),
            Self::Many(links) => links,
        }
    }
}

/// The `links` object Bitbucket attaches to resources, keyed by relation
/// (`self`, `html`, `avatar`, `clone`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(pub BTreeMap<String, LinkSet>);

impl Links {
    /// The `href` of the first link of a relation.
    ///
    /// ```rust
    /// use bitbucket_api::models::Links;
    ///
    /// let links: Links = serde_json::from_str(
    ///     r#"{"html": {"href": "https://bitbucket.org/ws/repo"}}"#,
    /// ).unwrap();
    /// assert_eq!(links.href("html"), Some("https://bitbucket.org/ws/repo"));
    /// assert_eq!(links.href("avatar"), None);
    /// ```
    pub fn href(&self, rel: &str) -> Option<&str> {
        self.0
            .get(rel)
            .and_then(|set| set.links().first())
            .and_then(|link| link.href.as_deref())
    }

    /// The clone URL for a protocol (`https` or `ssh`).
    pub fn clone_url(&self, protocol: &str) -> Option<&str> {
        self.0.get("clone").and_then(|set| {
            set.links()
                .iter()
                .find(|link| link.name.as_deref() == Some(protocol))
                .and_then(|link| link.href.as_deref())
        })
    }
}

/// Rendered text: the raw source plus its markup language and HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    /// `markdown`, `creole` or `plaintext`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl Content {
    /// Content with only `raw` set, the shape create/update bodies use.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw: Some(text.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_links() {
        let links: Links = serde_json::from_value(serde_json::json!({
            "clone": [
                {"href": "https://bitbucket.org/ws/repo.git", "name": "https"},
                {"href": "git@bitbucket.org:ws/repo.git", "name": "ssh"}
            ]
        }))
        .unwrap();

        assert_eq!(links.clone_url("ssh"), Some("git@bitbucket.org:ws/repo.git"));
        assert_eq!(links.href("clone"), Some("https://bitbucket.org/ws/repo.git"));
        assert_eq!(links.clone_url("svn"), None);
    }

    #[test]
    fn test_content_raw_skips_unset() {
        let value = serde_json::to_value(Content::raw("hello")).unwrap();
        assert_eq!(value, serde_json::json!({"raw": "hello"}));
    }
}
