//
//  yacargo
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Token Storage
//!
//! OAuth tokens are kept in the system keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `yacargo`
//! - **Account**: the environment, `production` or `test`
//! - **Secret**: the OAuth token
//!
//! ## Example
//!
//! ```rust,no_run
//! use yacargo::auth::{Environment, KeyringStore};
//!
//! fn manage_tokens() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store(Environment::Test, "oauth_token_here")?;
//!
//!     if let Some(_token) = store.get(Environment::Test)? {
//!         println!("Found stored token");
//!     }
//!
//!     store.delete(Environment::Test)?;
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

use super::Environment;

const SERVICE_NAME: &str = "yacargo";

/// Token store backed by the system keyring.
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

    /// Stores the token for `environment`, replacing any previous one.
    pub fn store(&self, environment: Environment, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, environment.as_str())?;
        entry.set_password(token)?;
        Ok(())
    }

    /// Returns the stored token, `None` if nothing is stored.
    pub fn get(&self, environment: Environment) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, environment.as_str())?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the stored token. Removing a missing token is not an error.
    pub fn delete(&self, environment: Environment) -> Result<()> {
        let entry = Entry::new(&self.service, environment.as_str())?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
