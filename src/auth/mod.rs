//
//  bitbucket-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials the client attaches to every request. The client never
//! negotiates or refreshes anything; a credential is simply turned into one
//! header.
//!
//! ## Supported Authentication Methods
//!
//! - **Token**: an access token, repository/workspace token or API token sent
//!   as `<prefix> <token>` in a configurable header (defaults to
//!   `Authorization: Bearer <token>`).
//! - **OAuth 2.0**: an access token obtained elsewhere, with optional expiry
//!   tracking.
//! - **App Password**: username and app password sent with HTTP Basic.
//!
//! ## Module Structure
//!
//! - [`keyring`]: Secure credential storage using the system keyring
//! - [`token`]: Token input and validation helpers
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_api::auth::AuthCredential;
//!
//! let credential = AuthCredential::bearer("my-token");
//! assert_eq!(credential.header_name(), "Authorization");
//! assert_eq!(credential.header_value(), "Bearer my-token");
//! ```

mod keyring;
mod token;

pub use keyring::*;
pub use token::*;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Default header used to carry credentials.
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";

/// Default token prefix.
pub const DEFAULT_TOKEN_PREFIX: &str = "Bearer";

/// Authentication credentials supported by the client.
///
/// # Variants
///
/// - `Token`: a token sent as `<prefix> <token>` in `header_name`. An empty
///   prefix sends the bare token.
/// - `OAuth`: OAuth 2.0 access token with optional refresh token and expiry.
/// - `AppPassword`: username and app password combination (HTTP Basic).
///
/// # Notes
///
/// - Credentials serialize to tagged JSON so they can be kept in the keyring.
/// - `Debug` output redacts secrets.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthCredential {
    /// Token sent in a configurable header.
    Token {
        /// The token string.
        token: String,
        /// Scheme written before the token. Empty means none.
        #[serde(default = "default_prefix")]
        prefix: String,
        /// Header the token is sent in.
        #[serde(default = "default_header_name")]
        header_name: String,
    },
    /// OAuth 2.0 access token.
    OAuth {
        /// The OAuth 2.0 access token used for API authentication.
        access_token: String,
        /// Optional refresh token. The client never uses it.
        #[serde(default)]
        refresh_token: Option<String>,
        /// Optional expiration timestamp for the access token.
        #[serde(default)]
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    },
    /// App password authentication (HTTP Basic).
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        password: String,
    },
}

fn default_prefix() -> String {
    DEFAULT_TOKEN_PREFIX.to_string()
}

fn default_header_name() -> String {
    DEFAULT_AUTH_HEADER.to_string()
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token {
                prefix,
                header_name,
                ..
            } => f
                .debug_struct("Token")
                .field("token", &"<redacted>")
                .field("prefix", prefix)
                .field("header_name", header_name)
                .finish(),
            Self::OAuth { expires_at, .. } => f
                .debug_struct("OAuth")
                .field("access_token", &"<redacted>")
                .field("expires_at", expires_at)
                .finish(),
            Self::AppPassword { username, .. } => f
                .debug_struct("AppPassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

impl AuthCredential {
    /// A token sent as `Authorization: Bearer <token>`.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
            prefix: default_prefix(),
            header_name: default_header_name(),
        }
    }

    /// A token with a custom scheme and header.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_api::auth::AuthCredential;
    ///
    /// let credential = AuthCredential::token("abc", "", "X-Api-Key");
    /// assert_eq!(credential.header_name(), "X-Api-Key");
    /// assert_eq!(credential.header_value(), "abc");
    /// ```
    pub fn token(
        token: impl Into<String>,
        prefix: impl Into<String>,
        header_name: impl Into<String>,
    ) -> Self {
        Self::Token {
            token: token.into(),
            prefix: prefix.into(),
            header_name: header_name.into(),
        }
    }

    /// Username and app password, sent with HTTP Basic.
    pub fn app_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::AppPassword {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The header this credential is sent in.
    pub fn header_name(&self) -> &str {
        match self {
            Self::Token { header_name, .. } => header_name,
            Self::OAuth { .. } | Self::AppPassword { .. } => DEFAULT_AUTH_HEADER,
        }
    }

    /// The header value for this credential.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_api::auth::AuthCredential;
    ///
    /// let credential = AuthCredential::app_password("jdoe", "secret");
    /// assert_eq!(credential.header_value(), "Basic amRvZTpzZWNyZXQ=");
    /// ```
    pub fn header_value(&self) -> String {
        match self {
            Self::Token { token, prefix, .. } => {
                if prefix.is_empty() {
                    token.clone()
                } else {
                    format!("{} {}", prefix, token)
                }
            }
            Self::OAuth { access_token, .. } => format!("Bearer {}", access_token),
            Self::AppPassword { username, password } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
        }
    }

    /// Checks if the credential has expired.
    ///
    /// Only OAuth credentials with an explicit `expires_at` can expire.
    ///
    /// # Notes
    ///
    /// - Server-side token revocation is not detected by this method.
    pub fn is_expired(&self) -> bool {
        match self {
            Self::OAuth {
                expires_at: Some(exp),
                ..
            } => *exp < chrono::Utc::now(),
            _ => false,
        }
    }

    /// Checks if this credential carries a refresh token.
    pub fn can_refresh(&self) -> bool {
        matches!(
            self,
            Self::OAuth {
                refresh_token: Some(_),
                ..
            }
        )
    }

    /// A short label for status output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Token { .. } => "token",
            Self::OAuth { .. } => "oauth",
            Self::AppPassword { .. } => "app password",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_bearer_header() {
        let credential = AuthCredential::bearer("tok");
        assert_eq!(credential.header_name(), "Authorization");
        assert_eq!(credential.header_value(), "Bearer tok");
    }

    #[test]
    fn test_custom_prefix() {
        let credential = AuthCredential::token("tok", "JWT", "Authorization");
        assert_eq!(credential.header_value(), "JWT tok");
    }

    #[test]
    fn test_oauth_expiry() {
        let expired = AuthCredential::OAuth {
            access_token: "a".to_string(),
            refresh_token: Some("r".to_string()),
            expires_at: Some(Utc::now() - Duration::hours(1)),
        };
        assert!(expired.is_expired());
        assert!(expired.can_refresh());
        assert_eq!(expired.header_value(), "Bearer a");

        assert!(!AuthCredential::bearer("t").is_expired());
        assert!(!AuthCredential::bearer("t").can_refresh());
    }

    #[test]
    fn test_serde_roundtrip_defaults() {
        let credential: AuthCredential =
            serde_json::from_str(r#"{"kind": "token", "token": "abc"}"#).unwrap();
        assert_eq!(credential, AuthCredential::bearer("abc"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", AuthCredential::app_password("jdoe", "hunter2"));
        assert!(debug.contains("jdoe"));
        assert!(!debug.contains("hunter2"));
    }
}
