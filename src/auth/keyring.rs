//
//  bitbucket-api
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Credential Storage Module
//!
//! Stores credentials in the system's native keyring/keychain.
//!
//! ## Storage Model
//!
//! - **Service**: `bb-api`
//! - **Username/Key**: the API host (e.g. `api.bitbucket.org`)
//! - **Password/Value**: the credential serialized as JSON
//!
//! Entries written by other tools as a bare token string are read back as a
//! bearer token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_api::auth::{AuthCredential, KeyringStore};
//!
//! fn manage_credentials() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store_credential("api.bitbucket.org", &AuthCredential::bearer("token"))?;
//!
//!     if let Some(credential) = store.credential("api.bitbucket.org")? {
//!         println!("Found stored {} credential", credential.kind());
//!     }
//!
//!     store.delete("api.bitbucket.org")?;
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

use super::AuthCredential;

const SERVICE_NAME: &str = "bb-api";

/// Keyring-backed credential store.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Uses a different keyring service name. Mostly useful in tests.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Stores a raw secret for a host.
    pub fn store(&self, host: &str, secret: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        entry.set_password(secret)?;
        Ok(())
    }

    /// Reads the raw secret for a host.
    pub fn get(&self, host: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, host)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the entry for a host. Missing entries are not an error.
    pub fn delete(&self, host: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Serializes and stores a credential for a host.
    pub fn store_credential(&self, host: &str, credential: &AuthCredential) -> Result<()> {
        let secret = serde_json::to_string(credential)?;
        self.store(host, &secret)
    }

    /// Reads the credential stored for a host.
    pub fn credential(&self, host: &str) -> Result<Option<AuthCredential>> {
        Ok(self.get(host)?.map(|secret| parse_stored_credential(&secret)))
    }
}

/// Decodes a stored secret: tagged JSON, or a bare bearer token.
pub fn parse_stored_credential(secret: &str) -> AuthCredential {
    serde_json::from_str(secret).unwrap_or_else(|_| AuthCredential::bearer(secret.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_json_credential() {
        let secret = serde_json::to_string(&AuthCredential::app_password("u", "p")).unwrap();
        assert_eq!(
            parse_stored_credential(&secret),
            AuthCredential::app_password("u", "p")
        );
    }

    #[test]
    fn test_parse_stored_bare_token() {
        assert_eq!(
            parse_stored_credential("abc123\n"),
            AuthCredential::bearer("abc123")
        );
    }
}
