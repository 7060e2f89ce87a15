//
//  bitbucket-api
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Token input helpers.
//!
//! Bitbucket Cloud issues access tokens per repository, project or workspace,
//! and API tokens per account. All of them are opaque strings; the only local
//! check is that they are non-empty and contain no whitespace.

use anyhow::Result;

/// Reads a single token line from stdin, trimmed.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Basic shape check for a token.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::auth::validate_token;
///
/// assert!(validate_token("ATCTT3xFfGN0abc"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("two words"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}
