//
//  bitbucket-api
//  api/raw.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Untyped requests
//!
//! [`RawRequest`] reaches any path of the API without a dedicated endpoint
//! type. Every status is "documented": the body is handed back as JSON when it
//! parses, as a string otherwise, and as `null` when empty.
//!
//! ```rust,no_run
//! use bitbucket_api::api::{Client, RawRequest};
//! use reqwest::Method;
//!
//! # async fn example() -> bitbucket_api::api::common::Result<()> {
//! let client = Client::cloud()?;
//! let request = RawRequest::new(Method::GET, "/repositories/atlassian").with_query("pagelen", 5);
//! let response = client.send_detailed(&request).await?;
//! println!("{}: {:?}", response.status_code, response.parsed);
//! # Ok(())
//! # }
//! ```

use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::common::{ApiError, Result};
use super::request::{QueryParams, RequestBody};
use super::Endpoint;

/// A request to an arbitrary path.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub method: Method,
    /// Path relative to the base URL, or an absolute URL.
    pub path: String,
    pub query: QueryParams,
    pub body: RequestBody,
}

impl RawRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') && !path.starts_with("http://") && !path.starts_with("https://") {
            path.insert(0, '/');
        }
        Self {
            method,
            path,
            query: QueryParams::new(),
            body: RequestBody::Empty,
        }
    }

    /// Parses an HTTP method name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unknown`] for methods the API does not use.
    pub fn parse_method(method: &str) -> Result<Method> {
        match method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "HEAD" => Ok(Method::HEAD),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(ApiError::Unknown(format!(
                "Unsupported HTTP method: {}",
                method
            ))),
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push(key, value);
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

impl Endpoint for RawRequest {
    type Output = Value;

    fn method(&self) -> Method {
        self.method.clone()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn query(&self) -> QueryParams {
        self.query.clone()
    }

    fn body(&self) -> Result<RequestBody> {
        Ok(self.body.clone())
    }

    fn parse(&self, _status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        Ok(Some(raw_value(content)))
    }
}

/// Best-effort decoding of an arbitrary body.
pub fn raw_value(content: &[u8]) -> Value {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(content)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(content).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_adds_leading_slash() {
        assert_eq!(RawRequest::new(Method::GET, "user").path, "/user");
        assert_eq!(
            RawRequest::new(Method::GET, "https://example.com/x").path,
            "https://example.com/x"
        );
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(RawRequest::parse_method("patch").unwrap(), Method::PATCH);
        assert!(RawRequest::parse_method("BREW").is_err());
    }

    #[test]
    fn test_raw_value() {
        assert_eq!(raw_value(b""), Value::Null);
        assert_eq!(raw_value(b"{\"a\": 1}"), json!({"a": 1}));
        assert_eq!(raw_value(b"plain text"), json!("plain text"));
    }

    #[test]
    fn test_every_status_parses() {
        let request = RawRequest::new(Method::DELETE, "/x");
        let parsed = request
            .parse(StatusCode::IM_A_TEAPOT, b"{\"ok\": false}")
            .unwrap();
        assert_eq!(parsed, Some(json!({"ok": false})));
    }
}
