//
//  bitbucket-api
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request parts shared by all endpoints: query parameters, bodies, uploads
//! and path segment encoding.

use std::path::Path;

use serde::Serialize;

use super::common::{ApiError, Result};

/// Ordered query parameters.
///
/// Unset values are never sent, and list parameters repeat their key
/// (`state=OPEN&state=MERGED`), which is what Bitbucket expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    /// Pushes the value only when it is set.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Pushes one pair per value, repeating the key.
    pub fn push_all<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.push(key, value);
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// A file to upload in a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    /// The file contents.
    pub payload: Vec<u8>,

    /// Name reported to the server. Bitbucket uses it as the download name.
    pub file_name: Option<String>,

    /// Content type of the part, e.g. `application/zip`.
    pub mime_type: Option<String>,
}

impl File {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            file_name: None,
            mime_type: None,
        }
    }

    /// Reads a file from disk, using its file name as the part name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Body`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let payload = std::fs::read(path)
            .map_err(|e| ApiError::Body(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            payload,
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            mime_type: None,
        })
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// One field of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartField {
    Text { name: String, value: String },
    File { name: String, file: File },
}

/// The body an endpoint sends.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/json`
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`
    Multipart(Vec<MultipartField>),
}

impl RequestBody {
    /// Serializes a model into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Body`] if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| ApiError::Body(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Percent-encodes a single path segment, `/` included.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::request::encode_segment;
///
/// assert_eq!(encode_segment("feature/login"), "feature%2Flogin");
/// assert_eq!(encode_segment("my-repo"), "my-repo");
/// ```
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Encodes a slash-separated path, keeping the separators.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// `/repositories/{workspace}/{repo_slug}` with both segments encoded.
pub(crate) fn repo_path(workspace: &str, repo_slug: &str) -> String {
    format!(
        "/repositories/{}/{}",
        encode_segment(workspace),
        encode_segment(repo_slug)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt::<u32>("page", None);
        params.push_opt("pagelen", Some(25));
        assert_eq!(params.pairs(), &[("pagelen".to_string(), "25".to_string())]);
    }

    #[test]
    fn test_push_all_repeats_key() {
        let mut params = QueryParams::new();
        params.push_all("state", ["OPEN", "MERGED"]);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("state"), Some("OPEN"));
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("docs/read me.md"), "docs/read%20me.md");
    }

    #[test]
    fn test_repo_path_encodes_segments() {
        assert_eq!(repo_path("my team", "repo"), "/repositories/my%20team/repo");
    }

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(&serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(body, RequestBody::Json(serde_json::json!({"name": "x"})));
        assert!(RequestBody::default().is_empty());
    }
}
