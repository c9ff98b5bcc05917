//
//  yacargo
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for the Yandex cargo delivery B2B API.
//!
//! ## Hosts
//!
//! - **Production**: `b2b.taxi.yandex.net`
//! - **Test**: `b2b.taxi.tst.yandex.net`
//!
//! Every resource lives under `/b2b/cargo/integration/`.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: Transport, authentication headers and status mapping
//! - [`claims`]: Claim operations, request objects and response models
//! - [`performer`]: Courier position and phone forwarding
//! - [`reports`]: Asynchronous order reports
//! - [`common`]: Errors, validation, field paths and enumerations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use yacargo::api::CargoClient;
//!
//! # async fn example() -> Result<(), yacargo::api::ApiError> {
//! let client = CargoClient::new("your-oauth-token", true)?;
//! let claim = client.claim_info("741cedf82cd464fa6fa16d87155c636").await?;
//! println!("{} is {:?}", claim.claim_id(), claim.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result<T, ApiError>`:
//!
//! - `Config`: missing token or bad base URL
//! - `Param`: invalid argument, nothing was sent
//! - `Unauthorized`: 401 / 403
//! - `Api`: 400 / 404 / 409 with the server's `code` and `message`
//! - `UnexpectedStatus`: any other non-success status
//! - `Network`: the server could not be reached

/// Transport for the cargo API.
///
/// Provides [`CargoClient`], [`ApiRequest`](client::ApiRequest) and the
/// status code mapping.
pub mod client;

/// Claim operations.
pub mod claims;

/// Courier position and phone forwarding.
pub mod performer;

/// Order reports.
pub mod reports;

/// Types shared by every operation.
///
/// Includes:
/// - [`ApiError`]: Error taxonomy
/// - [`common::Validate`]: Request validation
/// - [`common::FieldPath`]: Flat name to wire path mapping
/// - Open enums such as [`common::ClaimStatus`]
pub mod common;

/// Re-export of the cargo API client.
pub use client::{ApiRequest, ApiResponse, CargoClient, DownloadedFile};

/// Re-export of the error type.
pub use common::ApiError;
