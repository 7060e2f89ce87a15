//
//  bitbucket-api
//  api/cloud/source.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw file contents.

use reqwest::{Method, StatusCode};

use super::failed;
use crate::api::common::{Outcome, Result};
use crate::api::request::{encode_path, encode_segment, repo_path};
use crate::api::Endpoint;

/// `GET /repositories/{workspace}/{repo_slug}/src/{commit}/{path}`
///
/// Returns the file bytes as stored. `commit` may be a hash or a branch name.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_api::api::cloud::source::GetSourceFile;
/// use bitbucket_api::api::Client;
///
/// # fn example() -> bitbucket_api::api::common::Result<()> {
/// let client = Client::cloud()?;
/// let request = GetSourceFile::new("ws", "repo", "main", "src/lib.rs");
/// let bytes = client.send_blocking_detailed(&request)?.into_result()?;
/// println!("{}", String::from_utf8_lossy(&bytes));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GetSourceFile {
    pub workspace: String,
    pub repo_slug: String,
    pub commit: String,
    pub file_path: String,
}

impl GetSourceFile {
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        commit: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            commit: commit.into(),
            file_path: file_path.into(),
        }
    }
}

impl Endpoint for GetSourceFile {
    type Output = Outcome<Vec<u8>>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!(
            "{}/src/{}/{}",
            repo_path(&self.workspace, &self.repo_slug),
            encode_segment(&self.commit),
            encode_path(self.file_path.trim_start_matches('/'))
        )
    }

    fn parse(&self, status: StatusCode, content: &[u8]) -> Result<Option<Self::Output>> {
        match status.as_u16() {
            200 => Ok(Some(Outcome::Success(content.to_vec()))),
            404 => failed(status, content),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_keeps_directories() {
        let request = GetSourceFile::new("ws", "repo", "feature/x", "/docs/read me.md");
        assert_eq!(
            request.path(),
            "/repositories/ws/repo/src/feature%2Fx/docs/read%20me.md"
        );
    }

    #[test]
    fn test_body_is_returned_verbatim() {
        let request = GetSourceFile::new("ws", "repo", "main", "logo.png");
        let bytes = vec![0x89, b'P', b'N', b'G', 0xff];
        assert_eq!(
            request.parse(StatusCode::OK, &bytes).unwrap(),
            Some(Outcome::Success(bytes))
        );
    }
}
