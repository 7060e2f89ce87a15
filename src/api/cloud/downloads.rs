//
//  bitbucket-api
//  api/cloud/downloads.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository downloads (build artifacts attached to a repository).

use reqwest::{Method, StatusCode};

use super::{done, failed, ok};
use crate::api::common::{ListOptions, Outcome, Paginated, Result};
use crate::api::request::{encode_segment, repo_path, File, MultipartField, QueryParams, RequestBody};
use crate::api::Endpoint;
use crate::models::DownloadArtifact;

fn downloads_path(workspace: &str, repo_slug: &str) -> String {
    format!("{}/downloads", repo_path(workspace, repo_slug))
}

/// `GET /repositories/{workspace}/{repo_slug}/downloads`
#[derive(Debug, Clone)]
pub struct ListDownloads {
    pub workspace: String,
    pub repo_slug: String,
    pub options: ListOptions,
}

impl ListDownloads {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            options: ListOptions::default(),
        }
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }
}

impl Endpoint for ListDownloads {
    type Output = Outcome<Paginated<DownloadArtifact>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        downloads_path(&self.workspace, &self.repo_slug)
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

/// `POST /repositories/{workspace}/{repo_slug}/downloads`
///
/// Uploads one or more files as `multipart/form-data`, each in a `files` part.
/// A file with the same name replaces the existing one.
#[derive(Debug, Clone)]
pub struct UploadDownload {
    pub workspace: String,
    pub repo_slug: String,
    pub files: Vec<File>,
}

impl UploadDownload {
    pub fn new(workspace: impl Into<String>, repo_slug: impl Into<String>, file: File) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            files: vec![file],
        }
    }

    pub fn file(mut self, file: File) -> Self {
        self.files.push(file);
        self
    }
}

impl Endpoint for UploadDownload {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        downloads_path(&self.workspace, &self.repo_slug)
    }

    fn body(&self) -> Result<RequestBody> {
        Ok(RequestBody::Multipart(
            self.files
                .iter()
                .cloned()
                .map(|file| MultipartField::File {
                    name: "files".to_string(),
                    file,
                })
                .collect(),
        ))
    }

    /// 406 means the upload was not sent as multipart.
    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            201 => done(),
            400 | 403 | 404 | 406 => failed(status, content),
            _ => Ok(None),
        }
    }
}

/// `DELETE /repositories/{workspace}/{repo_slug}/downloads/{filename}`
#[derive(Debug, Clone)]
pub struct DeleteDownload {
    pub workspace: String,
    pub repo_slug: String,
    pub filename: String,
}

impl DeleteDownload {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            filename: filename.into(),
        }
    }
}

impl Endpoint for DeleteDownload {
    type Output = Outcome<()>;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!(
            "{}/{}",
            downloads_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.filename)
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            204 => done(),
            403 | 404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_uses_files_parts() {
        let request = UploadDownload::new(
            "ws",
            "repo",
            File::new(b"one".to_vec()).with_file_name("a.zip"),
        )
        .file(File::new(b"two".to_vec()).with_file_name("b.zip"));

        let RequestBody::Multipart(fields) = request.body().unwrap() else {
            panic!("expected multipart");
        };
        assert_eq!(fields.len(), 2);
        assert!(fields
            .iter()
            .all(|field| matches!(field, MultipartField::File { name, .. } if name == "files")));
    }

    #[test]
    fn test_upload_created_has_no_body() {
        let request = UploadDownload::new("ws", "repo", File::new(Vec::new()));
        assert_eq!(
            request.parse(StatusCode::CREATED, b"").unwrap(),
            Some(Outcome::Success(()))
        );
    }
}
