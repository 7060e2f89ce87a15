//
//  bitbucket-api
//  models/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The Bitbucket error body.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AdditionalProperties;

/// `{"type": "error", "error": {"message": ..., "detail": ...}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// A string, or an object with per-field messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,

    /// Extra machine-readable data, such as the key of a conflicting object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorResponse {
    /// An error body carrying only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            object_type: Some("error".to_string()),
            error: Some(ErrorDetail {
                message: Some(message.into()),
                ..ErrorDetail::default()
            }),
            additional_properties: AdditionalProperties::new(),
        }
    }

    /// Decodes an error body. Never fails.
    ///
    /// The message comes from the first of these that is present:
    /// `error.message`, `errors[0].message`, `error.detail`, `message`. If
    /// none is, the raw body (or the status reason for an empty body) becomes
    /// the message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_api::models::ErrorResponse;
    /// use reqwest::StatusCode;
    ///
    /// let error = ErrorResponse::from_body(StatusCode::BAD_REQUEST, br#"{"message": "Bad branch"}"#);
    /// assert_eq!(error.message(), "Bad branch");
    ///
    /// let error = ErrorResponse::from_body(StatusCode::BAD_GATEWAY, b"");
    /// assert_eq!(error.message(), "Bad Gateway");
    /// ```
    pub fn from_body(status: StatusCode, content: &[u8]) -> Self {
        let json = match serde_json::from_slice::<Value>(content) {
            Ok(json) => json,
            Err(_) => return Self::with_message(fallback_message(status, content)),
        };

        let mut response = serde_json::from_value::<Self>(json.clone()).unwrap_or_default();
        if response.error.as_ref().and_then(|e| e.message.as_ref()).is_some() {
            return response;
        }

        let message = extract_message(&json)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_message(status, content));
        response.error.get_or_insert_with(ErrorDetail::default).message = Some(message);
        response
    }

    /// The error message. Empty only for a body built by hand without one.
    pub fn message(&self) -> &str {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .unwrap_or("")
    }
}

fn extract_message(json: &Value) -> Option<&str> {
    json.get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .or_else(|| {
            json.get("error")
                .and_then(|e| e.get("detail"))
                .and_then(|m| m.as_str())
        })
        .or_else(|| json.get("message").and_then(|m| m.as_str()))
        .or_else(|| json.get("error").and_then(|m| m.as_str()))
}

fn fallback_message(status: StatusCode, content: &[u8]) -> String {
    let body = String::from_utf8_lossy(content);
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_error_shape() {
        let error = ErrorResponse::from_body(
            StatusCode::NOT_FOUND,
            br#"{"type": "error", "error": {"message": "Repository not found", "detail": "gone"}}"#,
        );
        assert_eq!(error.object_type.as_deref(), Some("error"));
        assert_eq!(error.message(), "Repository not found");
        assert_eq!(
            error.error.unwrap().detail,
            Some(Value::String("gone".to_string()))
        );
    }

    #[test]
    fn test_errors_array_shape() {
        let error = ErrorResponse::from_body(
            StatusCode::CONFLICT,
            br#"{"errors": [{"message": "Already exists"}]}"#,
        );
        assert_eq!(error.message(), "Already exists");
        assert!(error.additional_properties.contains_key("errors"));
    }

    #[test]
    fn test_detail_only_shape() {
        let error = ErrorResponse::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"error": {"detail": "Invalid value"}}"#,
        );
        assert_eq!(error.message(), "Invalid value");
    }

    #[test]
    fn test_non_json_body() {
        let error = ErrorResponse::from_body(StatusCode::BAD_GATEWAY, b"<html>upstream</html>");
        assert_eq!(error.message(), "<html>upstream</html>");
    }

    #[test]
    fn test_unknown_status_without_reason() {
        let status = StatusCode::from_u16(555).unwrap();
        let error = ErrorResponse::from_body(status, b"  ");
        assert_eq!(error.message(), "HTTP 555");
    }
}
