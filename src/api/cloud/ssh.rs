//
//  bitbucket-api
//  api/cloud/ssh.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SSH keys on a user account.

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::SshKey;

fn keys_path(selected_user: &str) -> String {
    format!("/users/{}/ssh-keys", encode_segment(selected_user))
}

/// `GET /users/{selected_user}/ssh-keys`
#[derive(Debug, Clone)]
pub struct ListSshKeys {
    pub selected_user: String,
    pub options: ListOptions,
}

impl ListSshKeys {
    pub fn new(selected_user: impl Into<String>) -> Self {
        Self {
            selected_user: selected_user.into(),
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListSshKeys {
    type Output = Outcome<Paginated<SshKey>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        keys_path(&self.selected_user)
    }

    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.options.apply(&mut params);
        params
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => ok(content),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `POST /users/{selected_user}/ssh-keys`
#[derive(Debug, Clone)]
pub struct CreateSshKey {
    pub selected_user: String,
    pub body: SshKey,
}

impl CreateSshKey {
    pub fn new(
        selected_user: impl Into<String>,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            selected_user: selected_user.into(),
            body: SshKey::new(key, label),
        }
    }
}

impl Endpoint for CreateSshKey {
    type Output = Outcome<SshKey>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        keys_path(&self.selected_user)
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(&self.body)
    }

    /// 400 covers malformed keys and keys already in use.
    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => ok(content),
            400 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /users/{selected_user}/ssh-keys/{key_id}`
#[derive(Debug, Clone)]
pub struct DeleteSshKey {
    pub selected_user: String,
    pub key_id: String,
}

impl DeleteSshKey {
    pub fn new(selected_user: impl Into<String>, key_id: impl Into<String>) -> Self {
        Self {
            selected_user: selected_user.into(),
            key_id: key_id.into(),
        }
    }
}

impl Endpoint for DeleteSshKey {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            keys_path(&self.selected_user),
            encode_segment(&self.key_id)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            400 | 403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_encode_user_uuid() {
        let request = DeleteSshKey::new("{abc}", "{key}");
        assert_eq!(request.path(), "/users/%7Babc%7D/ssh-keys/%7Bkey%7D");
    }

    #[test]
    fn test_add_key_body() {
        let request = CreateSshKey::new("me", "ssh-ed25519 AAAA test@host", "laptop");
        assert_eq!(
            request.body().unwrap(),
            RequestBody::Json(serde_json::json!({
                "key": "ssh-ed25519 AAAA test@host",
                "label": "laptop"
            }))
        );
    }
}
