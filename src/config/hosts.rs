//
//  bitbucket-api
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Well-known hosts and host normalization.
//!
//! Credentials are stored per API host, so every base URL pointing at the same
//! host shares one keyring entry.

/// Base URL of the Bitbucket Cloud REST API 2.0.
pub const BITBUCKET_API_URL: &str = "https://api.bitbucket.org/2.0";

/// The API host of Bitbucket Cloud.
pub const BITBUCKET_API_HOST: &str = "api.bitbucket.org";

/// The web host of Bitbucket Cloud, as it appears in clone URLs.
pub const BITBUCKET_WEB_HOST: &str = "bitbucket.org";

/// Returns `true` for the Bitbucket Cloud web or API host.
pub fn is_cloud_host(host: &str) -> bool {
    let host = normalize_host(host);
    host == BITBUCKET_WEB_HOST || host == BITBUCKET_API_HOST
}

/// Normalizes a host or URL into a bare lowercase hostname.
///
/// Scheme, path and surrounding whitespace are removed; an explicit port is
/// kept.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::config::normalize_host;
///
/// assert_eq!(normalize_host("https://API.bitbucket.org/2.0/"), "api.bitbucket.org");
/// assert_eq!(normalize_host("bitbucket.org"), "bitbucket.org");
/// ```
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if let Ok(url) = url::Url::parse(host) {
        if let Some(name) = url.host_str() {
            return match url.port() {
                Some(port) => format!("{}:{}", name.to_lowercase(), port),
                None => name.to_lowercase(),
            };
        }
    }
    let host = host.strip_prefix("https://").unwrap_or(host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    host.split('/').next().unwrap_or(host).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_port() {
        assert_eq!(normalize_host("http://127.0.0.1:1234/2.0"), "127.0.0.1:1234");
    }

    #[test]
    fn test_cloud_hosts() {
        assert!(is_cloud_host(BITBUCKET_API_URL));
        assert!(is_cloud_host("bitbucket.org"));
        assert!(!is_cloud_host("git.example.com"));
    }
}
