//
//  bitbucket-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP plumbing for the Bitbucket Cloud REST API 2.0.
//!
//! ## Architecture
//!
//! - [`client`]: the shared [`Client`] (base URL, headers, cookies, timeout,
//!   credentials) and the four call variants
//! - [`common`]: errors, the [`Response`] envelope, [`Outcome`] and pagination
//! - [`request`]: query parameters, request bodies and uploads
//! - [`cloud`]: one struct per API operation, grouped by resource
//! - [`raw`]: an untyped request for paths without a dedicated endpoint
//!
//! Every operation implements [`Endpoint`]: it knows its method, path, query
//! and body, and which model each documented status code decodes into.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::pullrequests::ListPullRequests;
//! use bitbucket_api::api::Client;
//! use bitbucket_api::auth::AuthCredential;
//! use bitbucket_api::models::PullRequestState;
//!
//! # async fn example() -> bitbucket_api::api::common::Result<()> {
//! let client = Client::cloud()?.with_auth(AuthCredential::bearer("your-token"));
//!
//! let request = ListPullRequests::new("myworkspace", "myrepo").state(PullRequestState::Open);
//! let page = client.send_detailed(&request).await?.into_result()?;
//! for pr in page.values {
//!     println!("#{} {}", pr.id.unwrap_or_default(), pr.title.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Call variants
//!
//! | Method | Blocking | Returns |
//! |--------|----------|---------|
//! | [`Client::send_detailed`] | no | [`Response<E::Output>`](Response) |
//! | [`Client::send`] | no | `Option<E::Output>` |
//! | [`Client::send_blocking_detailed`] | yes | [`Response<E::Output>`](Response) |
//! | [`Client::send_blocking`] | yes | `Option<E::Output>` |

use reqwest::{Method, StatusCode};

/// Core HTTP client wrapper.
pub mod client;

/// Bitbucket Cloud API 2.0 endpoints, grouped by resource.
pub mod cloud;

/// Types shared by every endpoint.
pub mod common;

/// Untyped passthrough requests.
pub mod raw;

/// Query parameters, bodies and path encoding.
pub mod request;

pub use client::Client;
pub use common::{ApiError, ListOptions, Outcome, Paginated, Response};
pub use raw::RawRequest;
pub use request::{File, QueryParams, RequestBody};

/// One HTTP operation of the API.
///
/// Implementors describe the request; the [`Client`] does the sending.
/// `parse` is the status dispatch: it decodes the body for each status the
/// operation documents and returns `Ok(None)` for anything else.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::common::{Outcome, Result};
/// use bitbucket_api::api::Endpoint;
/// use bitbucket_api::models::Account;
/// use reqwest::{Method, StatusCode};
///
/// struct Whoami;
///
/// impl Endpoint for Whoami {
///     type Output = Outcome<Account>;
///
///     fn method(&self) -> Method {
///         Method::GET
///     }
///
///     fn path(&self) -> String {
///         "/user".to_string()
///     }
///
///     fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
///         match status.as_u16() {
///             200 => Ok(Some(Outcome::Success(serde_json::from_slice(content)?))),
///             401 => Ok(Some(Outcome::failure(status, content))),
///             _ => Ok(None),
///         }
///     }
/// }
/// ```
pub trait Endpoint {
    /// What the documented statuses decode into.
    type Output;

    /// HTTP method.
    fn method(&self) -> Method;

    /// Path relative to the base URL, already percent-encoded. An absolute
    /// `http(s)://` URL is used as-is.
    fn path(&self) -> String;

    /// Query parameters. Unset parameters are simply not pushed.
    fn query(&self) -> QueryParams {
        QueryParams::new()
    }

    /// Request body.
    fn body(&self) -> common::Result<RequestBody> {
        Ok(RequestBody::Empty)
    }

    /// Decodes the body for a documented status.
    fn parse(&self, status: StatusCode, content: &[u8]) -> common::Result<Option<Self::Output>>;
}
