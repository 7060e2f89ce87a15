//
//  bitbucket-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitbucket Cloud client
//!
//! This module provides the shared plumbing every endpoint relies on: the
//! unified error type, the response envelope returned by the `*_detailed`
//! call variants, and the [`Outcome`] that a documented status code decodes
//! into.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Response`] - Status code, raw content, headers and the parsed body
//! - [`Outcome`] - Either the success model or the Bitbucket error body
//! - Pagination types (re-exported from the [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthRequired) => println!("Please authenticate first"),
//!         Err(ApiError::NotFound(resource)) => println!("Resource not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::borrow::Cow;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::ErrorResponse;

mod pagination;

pub use pagination::*;

/// Unified error type for all Bitbucket API operations.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `AuthRequired` | No authentication credentials provided | N/A |
/// | `AuthFailed` | Invalid or expired credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Requested resource does not exist | 404, 410 |
/// | `BadRequest` | Invalid request parameters | 400, 409, 422 |
/// | `RateLimited` | Too many requests, retry later | 429 |
/// | `ServerError` | Internal server error | 5xx |
/// | `UnexpectedStatus` | Status the endpoint does not document | any |
/// | `Network` | Transport failure (DNS, TLS, timeout) | N/A |
/// | `Decode` | A documented body failed to deserialize | N/A |
///
/// # Notes
///
/// - `UnexpectedStatus` is only produced when the client was built with
///   `raise_on_unexpected_status`; otherwise the envelope carries `parsed: None`
/// - The `Network` variant automatically converts from `reqwest::Error`
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication credentials are required but not provided.
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed due to invalid or expired credentials.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found (or is gone).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Access to the resource is forbidden.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The request was malformed or conflicted with server state.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal server error occurred on the Bitbucket side.
    #[error("Server error: {0}")]
    ServerError(String),

    /// The server answered with a status the endpoint does not document.
    ///
    /// The raw body is kept so callers can still inspect it.
    #[error(
        "Unexpected status code: {status}\n\nResponse content:\n{}",
        String::from_utf8_lossy(.content)
    )]
    UnexpectedStatus {
        /// The status code the server returned
        status: StatusCode,
        /// The raw response body
        content: Vec<u8>,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body for a documented status could not be decoded.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL or an endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be built.
    #[error("Invalid request body: {0}")]
    Body(String),

    /// An unknown or unexpected error occurred.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Maps an error status and message onto the matching variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_api::api::common::ApiError;
    /// use reqwest::StatusCode;
    ///
    /// let err = ApiError::from_status(StatusCode::NOT_FOUND, "Repository not found");
    /// assert!(matches!(err, ApiError::NotFound(_)));
    /// ```
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status.as_u16() {
            400 | 409 | 422 => Self::BadRequest(message),
            401 => Self::AuthFailed(message),
            403 => Self::Forbidden(message),
            404 | 410 => Self::NotFound(message),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(message),
            _ => Self::Unknown(format!("{} ({})", message, status)),
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Response envelope returned by the `*_detailed` call variants.
///
/// Carries everything the server sent back plus the body decoded according to
/// the endpoint's status dispatch. `parsed` is `None` when the status code is
/// not one the endpoint documents.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_api::api::cloud::repositories::GetRepository;
/// use bitbucket_api::api::Client;
///
/// # async fn example() -> bitbucket_api::api::common::Result<()> {
/// let client = Client::cloud()?;
/// let response = client.send_detailed(&GetRepository::new("atlassian", "python-bitbucket")).await?;
/// println!("{} ({} bytes)", response.status_code, response.content.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// HTTP status code of the response.
    pub status_code: StatusCode,

    /// The raw response body.
    pub content: Vec<u8>,

    /// Response headers as received.
    pub headers: HeaderMap,

    /// The body decoded by the endpoint's status dispatch, if the status is documented.
    pub parsed: Option<T>,
}

impl<T> Response<T> {
    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    /// The body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Looks up a response header as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Discards the envelope and keeps the parsed body.
    pub fn into_parsed(self) -> Option<T> {
        self.parsed
    }

    /// Transforms the parsed body while keeping the rest of the envelope.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            status_code: self.status_code,
            content: self.content,
            headers: self.headers,
            parsed: self.parsed.map(f),
        }
    }
}

/// What a documented status code decoded into.
///
/// Bitbucket documents most error statuses with the same `error` schema, so
/// every endpoint's output is either the success model or that error body.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::common::Outcome;
/// use reqwest::StatusCode;
///
/// let body = br#"{"type": "error", "error": {"message": "Repository not found"}}"#;
/// let outcome: Outcome<()> = Outcome::failure(StatusCode::NOT_FOUND, body);
///
/// assert!(!outcome.is_success());
/// assert_eq!(outcome.error_message(), Some("Repository not found"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The success model for a 2xx status.
    Success(T),

    /// A documented error status and its decoded body.
    Failure {
        /// The status code the error was returned with
        status: StatusCode,
        /// The decoded Bitbucket error body
        error: ErrorResponse,
    },
}

impl<T> Outcome<T> {
    /// Builds a failure from a raw error body. Never fails to decode.
    pub fn failure(status: StatusCode, content: &[u8]) -> Self {
        Self::Failure {
            status,
            error: ErrorResponse::from_body(status, content),
        }
    }

    /// Returns `true` if this is the success model.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrows the success model, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// The error message of a failure, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error.message()),
        }
    }

    /// Transforms the success model.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure { status, error } => Outcome::Failure { status, error },
        }
    }

    /// Converts into a `Result`, mapping failures by status code.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] variant matching the failure status, carrying
    /// the server's message.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { status, error } => {
                Err(ApiError::from_status(status, error.message().to_string()))
            }
        }
    }
}

/// Deserializes a JSON body for a documented status.
pub(crate) fn decode<T: DeserializeOwned>(content: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(content)?)
}

impl<T> Response<Outcome<T>> {
    /// Collapses the envelope into the success model.
    ///
    /// # Errors
    ///
    /// - A documented failure maps through [`Outcome::into_result`]
    /// - An undocumented status becomes [`ApiError::UnexpectedStatus`]
    pub fn into_result(self) -> Result<T> {
        match self.parsed {
            Some(outcome) => outcome.into_result(),
            None => Err(ApiError::UnexpectedStatus {
                status: self.status_code,
                content: self.content,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, "nope"),
            ApiError::AuthFailed(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::GONE, "gone"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, "exists"),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::from_u16(555).unwrap(), "timeout"),
            ApiError::ServerError(_)
        ));
    }

    #[test]
    fn test_unexpected_status_message_includes_body() {
        let err = ApiError::UnexpectedStatus {
            status: StatusCode::IM_A_TEAPOT,
            content: b"short and stout".to_vec(),
        };
        let message = err.to_string();
        assert!(message.contains("418"));
        assert!(message.contains("short and stout"));
    }

    #[test]
    fn test_outcome_into_result() {
        let ok: Outcome<u32> = Outcome::Success(7);
        assert_eq!(ok.into_result().unwrap(), 7);

        let failed: Outcome<u32> =
            Outcome::failure(StatusCode::FORBIDDEN, br#"{"error": {"message": "Denied"}}"#);
        match failed.into_result() {
            Err(ApiError::Forbidden(msg)) => assert_eq!(msg, "Denied"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_response_map_keeps_envelope() {
        let response = Response {
            status_code: StatusCode::OK,
            content: b"{}".to_vec(),
            headers: HeaderMap::new(),
            parsed: Some(2),
        };
        let mapped = response.map(|v| v * 10);
        assert_eq!(mapped.parsed, Some(20));
        assert_eq!(mapped.text(), "{}");
        assert!(mapped.is_success());
    }

    #[test]
    fn test_undocumented_status_into_result() {
        let response: Response<Outcome<u32>> = Response {
            status_code: StatusCode::IM_A_TEAPOT,
            content: b"teapot".to_vec(),
            headers: HeaderMap::new(),
            parsed: None,
        };
        match response.into_result() {
            Err(ApiError::UnexpectedStatus { status, content }) => {
                assert_eq!(status, StatusCode::IM_A_TEAPOT);
                assert_eq!(content, b"teapot");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
