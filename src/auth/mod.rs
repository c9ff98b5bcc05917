//
//  yacargo
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The cargo API authenticates every request with an OAuth token sent as
//! `Authorization: Bearer <token>`. Production and test hosts use
//! different tokens, so each [`Environment`] has its own keyring entry.
//!
//! ## Token Resolution
//!
//! [`resolve_token`] picks the first available source:
//!
//! 1. The explicit `--token` flag or the `YACARGO_TOKEN` variable
//! 2. The token stored with `yacargo auth login`

mod keyring;

pub use self::keyring::*;

use anyhow::{bail, Result};

/// Environment variable holding the OAuth token.
pub const TOKEN_ENV: &str = "YACARGO_TOKEN";

/// Target API host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Test,
}

impl Environment {
    pub fn from_test_server(test_server: bool) -> Self {
        if test_server {
            Self::Test
        } else {
            Self::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Keyring,
}

/// Picks the explicit token if it is non-empty, otherwise falls back to
/// `stored`.
///
/// Kept separate from the keyring lookup so the precedence is testable.
pub fn choose_token(
    explicit: Option<&str>,
    stored: impl FnOnce() -> Result<Option<String>>,
) -> Result<Option<(String, TokenSource)>> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(Some((token.to_string(), TokenSource::Flag)));
    }
    Ok(stored()?
        .filter(|t| !t.is_empty())
        .map(|t| (t, TokenSource::Keyring)))
}

/// Resolves the token for `environment` or fails with a hint on how to
/// provide one.
pub fn resolve_token(explicit: Option<&str>, environment: Environment) -> Result<String> {
    let store = KeyringStore::new();
    match choose_token(explicit, || store.get(environment))? {
        Some((token, source)) => {
            tracing::debug!("Using {} token from {:?}", environment, source);
            Ok(token)
        }
        None => bail!(
            "No OAuth token for the {} environment. Pass --token, set {} or run 'yacargo auth login'",
            environment,
            TOKEN_ENV
        ),
    }
}

/// Masks a token for display, keeping the last four characters.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
