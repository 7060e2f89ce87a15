//
//  bitbucket-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Bitbucket Cloud API Responses
//!
//! Bitbucket Cloud pages list results and links each page to the next one
//! with an absolute `next` URL. The client never loops over pages on its own;
//! callers follow `next` explicitly through the [`NextPage`] endpoint.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::api::common::Paginated;
//! use serde::Deserialize;
//!
//! #[derive(Clone, Deserialize)]
//! struct Repository {
//!     slug: String,
//! }
//!
//! let json = r#"{
//!     "values": [{"slug": "repo1"}],
//!     "page": 1,
//!     "pagelen": 10,
//!     "size": 25,
//!     "next": "https://api.bitbucket.org/2.0/repositories/ws?page=2"
//! }"#;
//!
//! let page: Paginated<Repository> = serde_json::from_str(json).unwrap();
//! assert!(page.has_next());
//! assert_eq!(page.values[0].slug, "repo1");
//! ```

use std::marker::PhantomData;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{decode, Outcome, Result};
use crate::api::request::QueryParams;
use crate::api::Endpoint;

/// One page of results from a Bitbucket Cloud list endpoint.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Array of items in the current page |
/// | `page` | `Option<u32>` | Current page number (1-indexed) |
/// | `pagelen` | `Option<u32>` | Number of items per page |
/// | `size` | `Option<u32>` | Total number of items across all pages |
/// | `next` | `Option<String>` | URL to fetch the next page |
/// | `previous` | `Option<String>` | URL to fetch the previous page |
///
/// # Notes
///
/// - The `size` field may not always be present for performance reasons
/// - Page numbers are 1-indexed (first page is page 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Array of items in the current page. May be empty.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages, when the server counts them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Absolute URL of the next page. `None` on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Absolute URL of the previous page. `None` on the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            page: None,
            pagelen: None,
            size: None,
            next: None,
            previous: None,
        }
    }
}

impl<T> Paginated<T> {
    /// Checks if there are more pages of results available.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the URL for the next page of results.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

/// Filtering, sorting and paging parameters shared by every list endpoint.
///
/// `q` and `sort` use Bitbucket's query language, e.g.
/// `q = state="OPEN" AND author.nickname="jdoe"` and `sort = -updated_on`.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::common::ListOptions;
///
/// let options = ListOptions::new()
///     .q(r#"language="rust""#)
///     .sort("-updated_on")
///     .pagelen(50);
/// assert_eq!(options.pagelen, Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Filter expression.
    pub q: Option<String>,

    /// Field to sort by; prefix with `-` for descending.
    pub sort: Option<String>,

    /// Page number to fetch (1-indexed).
    pub page: Option<u32>,

    /// Page size. Bitbucket caps this per endpoint (usually 100).
    pub pagelen: Option<u32>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn pagelen(mut self, pagelen: u32) -> Self {
        self.pagelen = Some(pagelen);
        self
    }

    /// Appends the set parameters to a query.
    pub fn apply(&self, params: &mut QueryParams) {
        params.push_opt("q", self.q.as_deref());
        params.push_opt("sort", self.sort.as_deref());
        params.push_opt("page", self.page);
        params.push_opt("pagelen", self.pagelen);
    }
}

/// `GET <next>`: fetches the page an earlier response linked to.
///
/// The URL is absolute, so the client's base URL is not prepended; the
/// client's headers and credentials still apply.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_api::api::cloud::repositories::ListWorkspaceRepositories;
/// use bitbucket_api::api::common::NextPage;
/// use bitbucket_api::api::Client;
///
/// # async fn example() -> bitbucket_api::api::common::Result<()> {
/// let client = Client::cloud()?;
/// let mut page = client
///     .send_detailed(&ListWorkspaceRepositories::new("atlassian"))
///     .await?
///     .into_result()?;
///
/// while let Some(next) = NextPage::from_page(&page) {
///     page = client.send_detailed(&next).await?.into_result()?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NextPage<T> {
    url: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> NextPage<T> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            _marker: PhantomData,
        }
    }

    /// Builds the request for the page after `page`, if there is one.
    pub fn from_page(page: &Paginated<T>) -> Option<Self> {
        page.next_url().map(Self::new)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<T: DeserializeOwned> Endpoint for NextPage<T> {
    type Output = Outcome<Paginated<T>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        self.url.clone()
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => Ok(Some(Outcome::Success(decode(content)?))),
            400 | 401 | 403 | 404 => Ok(Some(Outcome::failure(status, content))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_has_no_next() {
        let page: Paginated<u32> = serde_json::from_str(r#"{"values": [1, 2, 3]}"#).unwrap();
        assert!(!page.has_next());
        assert!(NextPage::from_page(&page).is_none());
    }

    #[test]
    fn test_missing_values_defaults_to_empty() {
        let page: Paginated<u32> = serde_json::from_str(r#"{"pagelen": 10}"#).unwrap();
        assert!(page.values.is_empty());
        assert_eq!(page.pagelen, Some(10));
    }

    #[test]
    fn test_next_page_uses_absolute_url() {
        let page: Paginated<u32> = serde_json::from_str(
            r#"{"values": [], "next": "https://api.bitbucket.org/2.0/workspaces?page=2"}"#,
        )
        .unwrap();
        let next = NextPage::from_page(&page).unwrap();
        assert_eq!(next.path(), "https://api.bitbucket.org/2.0/workspaces?page=2");
        assert!(next.query().is_empty());
    }

    #[test]
    fn test_list_options_apply_skips_unset() {
        let mut params = QueryParams::new();
        ListOptions::new().sort("-created_on").apply(&mut params);
        assert_eq!(params.get("sort"), Some("-created_on"));
        assert_eq!(params.get("q"), None);
        assert_eq!(params.len(), 1);
    }
}
