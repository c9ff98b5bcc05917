//
//  yacargo
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Yandex Cargo Delivery Library
//!
//! A typed client for the Yandex cargo delivery B2B API together with the
//! `yacargo` command-line tool built on it.
//!
//! ## Overview
//!
//! A delivery is described by a *claim*: cargo items, an ordered route of
//! pickup, drop-off and return points, and service requirements. The
//! client creates claims, follows their status, cancels them, fetches
//! documents and confirmation codes, locates the courier and builds order
//! reports.
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, request builders and response models
//! - [`auth`]: OAuth token storage in the system keyring
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (Table, JSON)
//! - [`cli`]: Command-line interface definitions using clap
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use yacargo::api::claims::{CargoItem, ClaimCreateRequest, ClaimDraft, Contact, Address, RoutePoint};
//! use yacargo::api::common::PointType;
//! use yacargo::api::CargoClient;
//!
//! # async fn example() -> Result<(), yacargo::api::ApiError> {
//! let client = CargoClient::new("your-oauth-token", true)?;
//!
//! let contact = Contact::new("Rick", "+79099999998");
//! let points = vec![
//!     RoutePoint::new(1, 1, PointType::Source, contact.clone(), Address::new("Moscow, Sadovnicheskaya 82", [37.64, 55.73])),
//!     RoutePoint::new(2, 2, PointType::Destination, contact, Address::new("Moscow, Tverskaya 1", [37.61, 55.75])),
//! ];
//! let items = vec![CargoItem::new(1, 2, "Documents", 100.0, "RUB", 1)];
//! let draft = ClaimDraft::new(items, points, "Rick", "+79099999998");
//!
//! let claim = client.claim_create(&ClaimCreateRequest::new("a1b2c3", draft)).await?;
//! println!("created {}", claim.claim_id());
//! # Ok(())
//! # }
//! ```
//!
//! ## Hosts
//!
//! | Environment | Host |
//! |-------------|------|
//! | Production | `b2b.taxi.yandex.net` |
//! | Test | `b2b.taxi.tst.yandex.net` |

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Client for the cargo delivery API.
///
/// Builders validate arguments and produce requests without I/O; the
/// client sends them and decodes the responses.
pub mod api;

/// OAuth token management.
///
/// Tokens are resolved from the command line, the environment or the
/// system keyring.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/yacargo/config.toml`
/// - macOS: `~/Library/Application Support/yacargo/config.toml`
/// - Windows: `%APPDATA%\yacargo\config\config.toml`
pub mod config;

/// Output formatting for tables and JSON.
pub mod output;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Re-export of the API client.
pub use api::{ApiError, CargoClient};

/// The application name, used for the keyring service and config directory.
pub const APP_NAME: &str = "yacargo";

/// The current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("yacargo/", env!("CARGO_PKG_VERSION"));

/// Exit codes used by the CLI.
///
/// | Code | Meaning |
/// |------|---------|
/// | 0 | Success |
/// | 1 | General error |
/// | 2 | Invalid arguments |
/// | 4 | Authentication error |
/// | 8 | Claim or report not found |
/// | 16 | Conflict, e.g. a stale version |
pub mod exit_codes {
    /// Command completed successfully.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid arguments, rejected before anything was sent.
    pub const USAGE: i32 = 2;

    /// The token is missing, invalid or lacks access.
    pub const AUTH_ERROR: i32 = 4;

    /// The server answered 404.
    pub const NOT_FOUND: i32 = 8;

    /// The server answered 409.
    pub const CONFLICT: i32 = 16;
}
