//
//  yacargo
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Functions
//!
//! - **Identifiers**: [`generate_request_id`]
//! - **String Utilities**: [`truncate`]
//! - **Size Utilities**: [`format_size`]

use rand::Rng;

/// Generates an idempotency key for `claim_create` and
/// `report_generate`: 32 lowercase hex characters.
///
/// # Example
///
/// ```rust
/// use yacargo::util::generate_request_id;
///
/// let id = generate_request_id();
/// assert_eq!(id.len(), 32);
/// ```
pub fn generate_request_id() -> String {
    let value: u128 = rand::rng().random();
    format!("{:032x}", value)
}

/// Truncates a string to `max_len` characters, ending with `...` when
/// anything was cut.
///
/// ```rust
/// use yacargo::util::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Formats a byte count for humans.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
