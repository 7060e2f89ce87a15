//
//  bitbucket-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Bitbucket API
//!
//! The [`Client`] carries everything requests share: base URL, extra headers,
//! cookies, timeout, TLS and redirect settings, and credentials. Endpoints
//! describe a single operation; the client turns them into HTTP requests and
//! wraps the answer in a [`Response`] envelope.
//!
//! ## Features
//!
//! - Async and blocking transports, each built lazily on first use
//! - Authentication header injection
//! - Status-code dispatch delegated to the endpoint
//! - Optional strict mode that fails on undocumented statuses
//! - Custom User-Agent header
//!
//! ## Notes
//!
//! The blocking transport runs its own runtime; do not call the
//! `send_blocking*` variants from inside an async context.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::{Method, StatusCode};

use super::common::{ApiError, Response, Result};
use super::request::{MultipartField, RequestBody};
use super::Endpoint;
use crate::auth::AuthCredential;
use crate::config::BITBUCKET_API_URL;

/// A request resolved against the client, ready for either transport.
struct PreparedRequest {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: RequestBody,
}

/// The shared HTTP client for the Bitbucket Cloud API.
///
/// Builder methods return a new client; settings that affect the transport
/// (timeout, TLS verification, redirects) discard any transport built so far.
/// A transport injected with [`Client::with_http_client`] or
/// [`Client::with_blocking_http_client`] is kept.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use bitbucket_api::api::Client;
/// use bitbucket_api::auth::AuthCredential;
///
/// let client = Client::cloud()?
///     .with_auth(AuthCredential::bearer("your-token"))
///     .with_timeout(Duration::from_secs(30))
///     .with_raise_on_unexpected_status(true);
/// assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
/// # Ok::<(), bitbucket_api::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct Client {
    base_url: String,
    headers: BTreeMap<String, String>,
    cookies: BTreeMap<String, String>,
    timeout: Option<Duration>,
    verify_ssl: bool,
    follow_redirects: bool,
    raise_on_unexpected_status: bool,
    auth: Option<AuthCredential>,
    async_http: OnceCell<reqwest::Client>,
    blocking_http: OnceCell<reqwest::blocking::Client>,
    injected_async: bool,
    injected_blocking: bool,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .field("verify_ssl", &self.verify_ssl)
            .field("follow_redirects", &self.follow_redirects)
            .field("raise_on_unexpected_status", &self.raise_on_unexpected_status)
            .field("auth", &self.auth.as_ref().map(AuthCredential::kind))
            .finish()
    }
}

impl Client {
    /// Creates a client for the given base URL.
    ///
    /// A trailing `/` is dropped so endpoint paths can always start with one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{}: not usable as a base URL",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            timeout: None,
            verify_ssl: true,
            follow_redirects: false,
            raise_on_unexpected_status: false,
            auth: None,
            async_http: OnceCell::new(),
            blocking_http: OnceCell::new(),
            injected_async: false,
            injected_blocking: false,
        })
    }

    /// Creates a client for Bitbucket Cloud at `https://api.bitbucket.org/2.0`.
    pub fn cloud() -> Result<Self> {
        Self::new(BITBUCKET_API_URL)
    }

    /// Sets the credentials sent with every request.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Merges extra headers into the ones sent with every request.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Merges cookies into the ones sent with every request.
    pub fn with_cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.cookies
            .extend(cookies.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self.reset_transports();
        self
    }

    /// Enables or disables TLS certificate verification.
    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self.reset_transports();
        self
    }

    /// Whether redirects are followed. Off by default, so endpoints that
    /// answer with a redirect surface it as a status.
    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self.reset_transports();
        self
    }

    /// When set, undocumented statuses fail with [`ApiError::UnexpectedStatus`]
    /// instead of returning an envelope with `parsed: None`.
    pub fn with_raise_on_unexpected_status(mut self, raise: bool) -> Self {
        self.raise_on_unexpected_status = raise;
        self
    }

    /// Uses a pre-built async transport.
    ///
    /// Base URL, headers, cookies and credentials still come from this client;
    /// timeout, TLS and redirect behaviour come from the transport, and later
    /// calls to [`Client::with_timeout`] and friends do not replace it.
    pub fn with_http_client(self, http: reqwest::Client) -> Self {
        Self {
            async_http: OnceCell::with_value(http),
            injected_async: true,
            ..self
        }
    }

    /// Uses a pre-built blocking transport.
    pub fn with_blocking_http_client(self, http: reqwest::blocking::Client) -> Self {
        Self {
            blocking_http: OnceCell::with_value(http),
            injected_blocking: true,
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> Option<&AuthCredential> {
        self.auth.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn raise_on_unexpected_status(&self) -> bool {
        self.raise_on_unexpected_status
    }

    /// Sends a request and returns the full envelope.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] for transport failures
    /// - [`ApiError::Decode`] if a documented body does not match its model
    /// - [`ApiError::UnexpectedStatus`] for undocumented statuses in strict mode
    pub async fn send_detailed<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Output>> {
        let prepared = self.prepare(endpoint)?;
        let http = self.async_http()?;

        tracing::debug!(method = %prepared.method, url = %prepared.url, "sending request");

        let mut request = http
            .request(prepared.method, &prepared.url)
            .headers(prepared.headers);
        if !prepared.query.is_empty() {
            request = request.query(&prepared.query);
        }
        request = match prepared.body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Form(pairs) => request.form(&pairs),
            RequestBody::Multipart(fields) => request.multipart(async_form(fields)?),
        };

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes().await?.to_vec();

        self.build_response(endpoint, status, headers, content)
    }

    /// Sends a request and returns only the parsed body.
    ///
    /// `None` means the server answered with a status the endpoint does not
    /// document (and strict mode is off).
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>> {
        Ok(self.send_detailed(endpoint).await?.parsed)
    }

    /// Blocking version of [`Client::send_detailed`].
    pub fn send_blocking_detailed<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<Response<E::Output>> {
        let prepared = self.prepare(endpoint)?;
        let http = self.blocking_http()?;

        tracing::debug!(method = %prepared.method, url = %prepared.url, "sending blocking request");

        let mut request = http
            .request(prepared.method, &prepared.url)
            .headers(prepared.headers);
        if !prepared.query.is_empty() {
            request = request.query(&prepared.query);
        }
        request = match prepared.body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Form(pairs) => request.form(&pairs),
            RequestBody::Multipart(fields) => request.multipart(blocking_form(fields)?),
        };

        let response = request.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes()?.to_vec();

        self.build_response(endpoint, status, headers, content)
    }

    /// Blocking version of [`Client::send`].
    pub fn send_blocking<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>> {
        Ok(self.send_blocking_detailed(endpoint)?.parsed)
    }

    /// Resolves URL, query, headers and body for an endpoint.
    fn prepare<E: Endpoint>(&self, endpoint: &E) -> Result<PreparedRequest> {
        let path = endpoint.path();
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path
        } else {
            format!("{}{}", self.base_url, path)
        };

        Ok(PreparedRequest {
            method: endpoint.method(),
            url,
            query: endpoint.query().pairs().to_vec(),
            headers: self.request_headers()?,
            body: endpoint.body()?,
        })
    }

    /// Headers sent with every request: configured headers, cookies, credentials.
    fn request_headers(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();

        for (name, value) in &self.headers {
            map.insert(header_name(name)?, header_value(value)?);
        }

        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            map.insert(COOKIE, header_value(&cookie)?);
        }

        if let Some(auth) = &self.auth {
            if auth.is_expired() {
                tracing::warn!("sending an expired {} credential", auth.kind());
            }
            let mut value = header_value(&auth.header_value())?;
            value.set_sensitive(true);
            map.insert(header_name(auth.header_name())?, value);
        }

        Ok(map)
    }

    /// Runs the endpoint's status dispatch and applies strict mode.
    fn build_response<E: Endpoint>(
        &self,
        endpoint: &E,
        status: StatusCode,
        headers: HeaderMap,
        content: Vec<u8>,
    ) -> Result<Response<E::Output>> {
        tracing::debug!(status = %status, bytes = content.len(), "received response");

        let parsed = endpoint.parse(status, &content)?;
        if parsed.is_none() {
            tracing::warn!(status = %status, "response status not documented for this endpoint");
            if self.raise_on_unexpected_status {
                return Err(ApiError::UnexpectedStatus { status, content });
            }
        }

        Ok(Response {
            status_code: status,
            content,
            headers,
            parsed,
        })
    }

    fn async_http(&self) -> Result<&reqwest::Client> {
        self.async_http.get_or_try_init(|| {
            let mut builder = reqwest::Client::builder()
                .user_agent(user_agent())
                .danger_accept_invalid_certs(!self.verify_ssl)
                .redirect(self.redirect_policy());
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            Ok(builder.build()?)
        })
    }

    fn blocking_http(&self) -> Result<&reqwest::blocking::Client> {
        self.blocking_http.get_or_try_init(|| {
            let mut builder = reqwest::blocking::Client::builder()
                .user_agent(user_agent())
                .danger_accept_invalid_certs(!self.verify_ssl)
                .redirect(self.redirect_policy());
            // The blocking builder defaults to a 30s timeout; `None` disables it.
            builder = builder.timeout(self.timeout);
            Ok(builder.build()?)
        })
    }

    fn redirect_policy(&self) -> reqwest::redirect::Policy {
        if self.follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        }
    }

    fn reset_transports(&mut self) {
        if !self.injected_async {
            self.async_http = OnceCell::new();
        }
        if !self.injected_blocking {
            self.blocking_http = OnceCell::new();
        }
    }
}

fn user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::VERSION)
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ApiError::InvalidHeader(format!("{}: {}", name, e)))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader(e.to_string()))
}

fn async_form(fields: Vec<MultipartField>) -> Result<reqwest::multipart::Form> {
    use reqwest::multipart::{Form, Part};

    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name, value),
            MultipartField::File { name, file } => {
                let mut part = Part::bytes(file.payload);
                if let Some(file_name) = file.file_name {
                    part = part.file_name(file_name);
                }
                if let Some(mime) = file.mime_type {
                    part = part.mime_str(&mime)?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn blocking_form(fields: Vec<MultipartField>) -> Result<reqwest::blocking::multipart::Form> {
    use reqwest::blocking::multipart::{Form, Part};

    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name, value),
            MultipartField::File { name, file } => {
                let mut part = Part::bytes(file.payload);
                if let Some(file_name) = file.file_name {
                    part = part.file_name(file_name);
                }
                if let Some(mime) = file.mime_type {
                    part = part.mime_str(&mime)?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = Client::new("https://example.com/2.0/").unwrap();
        assert_eq!(client.base_url(), "https://example.com/2.0");
    }

    #[test]
    fn test_new_rejects_relative_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_transport_settings_keep_injected_transport() {
        let client = Client::cloud()
            .unwrap()
            .with_http_client(reqwest::Client::new())
            .with_timeout(Duration::from_secs(3))
            .with_follow_redirects(true);
        assert!(client.async_http.get().is_some());
        assert!(client.blocking_http.get().is_none());
        assert_eq!(client.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_transport_settings_reset_built_transport() {
        let client = Client::cloud().unwrap();
        client.async_http().unwrap();
        let client = client.with_verify_ssl(false);
        assert!(client.async_http.get().is_none());
    }

    #[test]
    fn test_cloud_defaults() {
        let client = Client::cloud().unwrap();
        assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
        assert!(client.auth().is_none());
        assert!(client.timeout().is_none());
        assert!(!client.raise_on_unexpected_status());
    }

    #[test]
    fn test_request_headers_merge_cookies_and_auth() {
        let client = Client::cloud()
            .unwrap()
            .with_headers([("X-Trace", "1")])
            .with_cookies([("b", "2"), ("a", "1")])
            .with_auth(AuthCredential::bearer("tok"));

        let headers = client.request_headers().unwrap();
        assert_eq!(headers.get("x-trace").unwrap(), "1");
        assert_eq!(headers.get("cookie").unwrap(), "a=1; b=2");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer tok");
    }

    #[test]
    fn test_custom_auth_header() {
        let client = Client::cloud()
            .unwrap()
            .with_auth(AuthCredential::token("k", "", "X-Api-Key"));
        let headers = client.request_headers().unwrap();
        assert_eq!(headers.get("x-api-key").unwrap(), "k");
        assert!(headers.get("authorization").is_none());
    }

    #[test]
    fn test_invalid_header_name() {
        let client = Client::cloud().unwrap().with_headers([("bad header", "v")]);
        assert!(matches!(
            client.request_headers(),
            Err(ApiError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = Client::cloud()
            .unwrap()
            .with_auth(AuthCredential::bearer("super-secret"));
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("token"));
    }
}
