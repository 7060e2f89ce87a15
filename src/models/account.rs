//
//  bitbucket-api
//  models/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdditionalProperties, Links};

/// A user, team or app user.
///
/// Embedded everywhere a resource points at a person: owners, authors,
/// reviewers, reporters. `object_type` is `user`, `team` or `app_user`.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::models::Account;
///
/// let account: Account = serde_json::from_str(r#"{
///     "type": "user",
///     "display_name": "Jane Doe",
///     "nickname": "jdoe",
///     "uuid": "{d301aafa-d676-4ee0-88be-962be7417567}"
/// }"#).unwrap();
///
/// assert_eq!(account.name(), "jdoe");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Unique identifier, braces included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Atlassian account id, shared across Atlassian products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    /// Only set on team accounts and older payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl Account {
    /// Reference to an account by UUID, as request bodies expect.
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Self::default()
        }
    }

    /// The best short name available: nickname, username, display name, UUID.
    pub fn name(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.username.as_deref())
            .or(self.display_name.as_deref())
            .or(self.uuid.as_deref())
            .unwrap_or("unknown")
    }
}
