//
//  yacargo
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the cargo client
//!
//! This module provides the pieces shared by every operation of the cargo
//! API: the error taxonomy, the server error payload, the field validator,
//! the field-path table and the enumerated value sets.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ErrorBody`] - The `{"code": ..., "message": ...}` payload the server
//!   attaches to 4xx responses
//! - [`validate`] - Field validator and the [`Validate`] trait
//! - [`fields`] - Flat argument name to nested wire path mapping
//! - [`enums`] - Open string enums for server-defined value sets
//!
//! # Example
//!
//! ```rust
//! use yacargo::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Api { code, .. }) if code == "old_version" => {
//!             println!("Claim changed on the server, reload and retry")
//!         }
//!         Err(ApiError::Param(reason)) => println!("Fix the input: {}", reason),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod enums;
pub mod fields;
pub mod validate;

pub use enums::*;
pub use fields::{FieldPath, JsonBody};
pub use validate::Validate;

/// Machine-readable error codes documented for the cargo API.
///
/// The server may add codes over time. A code outside this list is logged
/// when it is received but the error is still returned to the caller.
pub const KNOWN_ERROR_CODES: &[&str] = &[
    "cancel_error",
    "change_destination_error",
    "db_error",
    "double_request",
    "esignature_error",
    "esignature_too_many_requests",
    "inappropriate_status",
    "not_allowed",
    "not_found",
    "old_lookup_version",
    "old_version",
    "payment_sms_send_failed",
    "payment_terminal_error",
    "payment_on_delivery_disabled",
    "payment_on_delivery_invalid_token",
    "payment_on_delivery_invalid_request",
    "pdf_failure",
    "send_email_error",
    "state_mismatch",
    "validation_error",
    "wrong_corp_client_id",
    "wrong_taxi_order_id",
    "confirmation_code_required",
    "items_without_parameters_forbidden",
    "payment_and_skip_sms_conflict",
    "no_input_point",
    "no_required_email_for_point",
    "unsupported_points_count",
    "invalid_source_point",
    "invalid_destination_point",
    "invalid_item_source_point",
    "invalid_item_destination_point",
    "item_source_point_not_found",
    "item_destination_point_not_found",
    "state_transition_forbidden",
    "invalid_cursor",
    "inappropriate_point",
    "external_order_id_not_allowed",
];

/// Returns `true` if `code` is one of the documented server error codes.
pub fn is_known_error_code(code: &str) -> bool {
    KNOWN_ERROR_CODES.contains(&code)
}

/// Unified error type for all cargo API operations.
///
/// `ApiError` keeps the flat taxonomy of the API: configuration problems,
/// invalid parameters caught before sending, authorization failures,
/// server-side rejections carrying a machine-readable code, and transport
/// failures that never reached the server.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `Config` | Missing token or malformed client configuration | N/A |
/// | `Param` | Argument failed validation, nothing was sent | N/A |
/// | `Unauthorized` | Token rejected by the server | 401, 403 |
/// | `Api` | Request rejected with a server error code | 400, 404, 409 |
/// | `UnexpectedStatus` | Any other non-success status | 429, 5xx, ... |
/// | `Network` | Connection, TLS or timeout failure | N/A |
/// | `Decode` | Success body was not the expected JSON | 2xx |
/// | `Io` | Writing a downloaded file failed | N/A |
///
/// # Notes
///
/// - The `Network` variant automatically converts from `reqwest::Error`
/// - Nothing in the client retries; every error surfaces from the call that
///   triggered it
#[derive(Error, Debug)]
pub enum ApiError {
    /// The client could not be constructed.
    ///
    /// Raised when no authorization token was supplied or the configured
    /// base URL cannot be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An argument is missing or failed validation.
    ///
    /// Always raised before any network call. The message names the
    /// argument and, where relevant, the operation it belongs to.
    #[error("Invalid parameter: {0}")]
    Param(String),

    /// The server rejected the token (HTTP 401 or 403).
    #[error("Not authorized ({status}): {message}")]
    Unauthorized {
        /// HTTP status code returned by the server.
        status: u16,
        /// Machine-readable error code, empty if the body carried none.
        code: String,
        /// Human-readable message from the server.
        message: String,
    },

    /// The server rejected the request (HTTP 400, 404 or 409).
    ///
    /// Callers are expected to branch on `code`, for example `old_version`
    /// or `state_mismatch`.
    #[error("API error {code} ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Machine-readable error code.
        code: String,
        /// Human-readable message from the server.
        message: String,
    },

    /// The server answered with a status outside the documented contract.
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by the server.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors
    /// and TLS failures: the request never got an HTTP answer.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Writing a downloaded document to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Builds a parameter error from anything printable.
    pub fn param(reason: impl Into<String>) -> Self {
        Self::Param(reason.into())
    }

    /// Returns the server's machine-readable error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { code, .. } | Self::Api { code, .. } if !code.is_empty() => {
                Some(code.as_str())
            }
            _ => None,
        }
    }

    /// Returns the HTTP status for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. }
            | Self::Api { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the error carries a documented server error code.
    pub fn is_known_code(&self) -> bool {
        self.code().is_some_and(is_known_error_code)
    }

    /// Returns `true` if the request never reached the server.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Error payload returned by the server with 4xx responses.
///
/// ```json
/// {"code": "not_found", "message": "Claim not found"}
/// ```
///
/// Both fields default to empty strings so a truncated or non-standard body
/// still produces a usable error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: String,

    /// Human-readable, localized error message.
    #[serde(default)]
    pub message: String,
}

impl ErrorBody {
    /// Parses an error payload, falling back to the raw text as the message.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self {
            code: String::new(),
            message: raw.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parse_json() {
        let body = ErrorBody::parse(r#"{"code":"not_found","message":"x"}"#);
        assert_eq!(body.code, "not_found");
        assert_eq!(body.message, "x");
    }

    #[test]
    fn test_error_body_parse_plain_text() {
        let body = ErrorBody::parse("Bad gateway\n");
        assert!(body.code.is_empty());
        assert_eq!(body.message, "Bad gateway");
    }

    #[test]
    fn test_code_accessor() {
        let err = ApiError::Api {
            status: 409,
            code: "old_version".to_string(),
            message: "stale".to_string(),
        };
        assert_eq!(err.code(), Some("old_version"));
        assert_eq!(err.status(), Some(409));
        assert!(err.is_known_code());

        let err = ApiError::Unauthorized {
            status: 401,
            code: String::new(),
            message: "no".to_string(),
        };
        assert_eq!(err.code(), None);
        assert!(!err.is_known_code());
    }

    #[test]
    fn test_unknown_code_is_not_known() {
        let err = ApiError::Api {
            status: 400,
            code: "brand_new_code".to_string(),
            message: String::new(),
        };
        assert_eq!(err.code(), Some("brand_new_code"));
        assert!(!err.is_known_code());
    }

    #[test]
    fn test_known_error_codes_count() {
        assert_eq!(KNOWN_ERROR_CODES.len(), 38);
        assert!(is_known_error_code("validation_error"));
        assert!(!is_known_error_code("teapot"));
    }
}
