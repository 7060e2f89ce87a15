//
//  bitbucket-api
//  api/cloud/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User endpoints.

use reqwest::{Method, StatusCode};

use super::{failed, ok};
use crate::api::common::{Outcome, Result};
use crate::api::request::encode_segment;
use crate::api::Endpoint;
use crate::models::Account;

/// `GET /user`
///
/// The account the credentials belong to. Used to validate a login.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetCurrentUser;

impl Endpoint for GetCurrentUser {
    type Output = Outcome<Account>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/user".to_string()
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `GET /users/{selected_user}`
///
/// `selected_user` is an account UUID (with braces) or an Atlassian account id.
#[derive(Debug, Clone)]
pub struct GetUser {
    pub selected_user: String,
}

impl GetUser {
    pub fn new(selected_user: impl Into<String>) -> Self {
        Self {
            selected_user: selected_user.into(),
        }
    }
}

impl Endpoint for GetUser {
    type Output = Outcome<Account>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/users/{}", encode_segment(&self.selected_user))
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            401 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_decode() {
        let body = br#"{"type": "user", "uuid": "{u1}", "display_name": "Ada", "has_2fa_enabled": true}"#;
        let outcome = GetCurrentUser.parse(StatusCode::OK, body).unwrap().unwrap();
        let account = outcome.success().unwrap();
        assert_eq!(account.uuid.as_deref(), Some("{u1}"));
        assert_eq!(
            account.additional_properties.get("has_2fa_enabled"),
            Some(&serde_json::json!(true))
        );
    }

    #[test]
    fn test_unauthorized_is_documented() {
        let outcome = GetCurrentUser
            .parse(StatusCode::UNAUTHORIZED, b"")
            .unwrap()
            .unwrap();
        assert!(!outcome.is_success());
    }
}
