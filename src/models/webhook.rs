//
//  bitbucket-api
//  models/webhook.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Webhook subscriptions.
//!
//! Events are named `<subject>:<action>`, e.g. `repo:push`,
//! `pullrequest:created`, `issue:comment_created`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdditionalProperties, Links};

/// A webhook on a repository or workspace.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::models::WebhookSubscription;
///
/// let hook = WebhookSubscription::new(
///     "https://ci.example.com/hooks/bitbucket",
///     ["repo:push", "pullrequest:created"],
/// );
/// assert_eq!(hook.active, Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSubscription {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Where events are delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `repository` or `workspace`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,

    /// Signing secret. Write-only; responses only report `secret_set`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_set: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl WebhookSubscription {
    /// An active webhook body for the given URL and events.
    pub fn new<I, S>(url: impl Into<String>, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            url: Some(url.into()),
            active: Some(true),
            events: Some(events.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}
