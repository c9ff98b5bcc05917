//
//  yacargo
//  api/common/validate.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Field validation helpers.
//!
//! Shapes are enforced by the type system; this module covers the rules
//! types cannot express: presence of required strings, numeric ranges,
//! string lengths, element counts, formats and set membership. Every helper
//! returns [`ApiError::Param`] with a message naming the offending field.
//!
//! Request value objects implement [`Validate`]; containers call
//! `validate()` on their children so one call checks a whole nested tree.

use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ApiError;

type Result<T> = std::result::Result<T, ApiError>;

/// Implemented by every request value object.
///
/// `validate` checks the local invariants of the object and of every
/// nested object it owns.
pub trait Validate {
    /// Checks the object, returning the first violated rule.
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

static PRODUCT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9A-F]{2} ){31}[0-9A-F]{2}$").expect("valid regex"));

static COUNTRY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

/// Fails if `value` is empty or whitespace only.
pub fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::param(format!("\"{}\" must not be empty", field)));
    }
    Ok(())
}

/// Unwraps a required operation argument.
///
/// `path` is the dotted wire path the argument is nested under, used only
/// in the error message: `<emergency_contact_name> (emergency_contact.name)
/// of <claim_create> is a required parameter`.
pub fn required<'a, T>(operation: &str, field: &str, path: &str, value: Option<&'a T>) -> Result<&'a T>
where
    T: ?Sized,
{
    value.ok_or_else(|| missing(operation, field, path))
}

/// Same as [`required`] for string arguments, also rejecting empty strings.
pub fn required_str<'a>(
    operation: &str,
    field: &str,
    path: &str,
    value: Option<&'a str>,
) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing(operation, field, path)),
    }
}

fn missing(operation: &str, field: &str, path: &str) -> ApiError {
    ApiError::param(format!(
        "<{}> ({}) of <{}> is a required parameter",
        field, path, operation
    ))
}

/// Fails unless `min <= value <= max`. Unordered values such as NaN fail.
pub fn in_range<T>(field: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + Display + Copy,
{
    if !(min..=max).contains(&value) {
        return Err(ApiError::param(format!(
            "\"{}\" should be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

/// Fails unless `value >= min`.
pub fn at_least<T>(field: &str, value: T, min: T) -> Result<()>
where
    T: PartialOrd + Display + Copy,
{
    if !(min..).contains(&value) {
        return Err(ApiError::param(format!(
            "\"{}\" should be at least {}, got {}",
            field, min, value
        )));
    }
    Ok(())
}

/// Fails unless `value > 0`. Also rejects NaN.
pub fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(ApiError::param(format!(
            "\"{}\" should be greater than 0, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Fails unless `value >= 0`. Also rejects NaN.
pub fn non_negative(field: &str, value: f64) -> Result<()> {
    if !(0.0..).contains(&value) {
        return Err(ApiError::param(format!(
            "\"{}\" should not be negative, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Fails unless the character count of `value` lies within `min..=max`.
pub fn length_between(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ApiError::param(format!(
            "\"{}\" should be {} to {} characters long, got {}",
            field, min, max, len
        )));
    }
    Ok(())
}

/// Fails unless `value` has exactly `len` characters.
pub fn exact_length(field: &str, value: &str, len: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual != len {
        return Err(ApiError::param(format!(
            "\"{}\" should be exactly {} characters long, got {}",
            field, len, actual
        )));
    }
    Ok(())
}

/// Fails unless a list holds `min..=max` elements.
pub fn count_between(field: &str, count: usize, min: usize, max: usize) -> Result<()> {
    if count < min {
        return Err(ApiError::param(format!(
            "\"{}\" should contain at least {} element(s), got {}",
            field, min, count
        )));
    }
    if count > max {
        return Err(ApiError::param(format!(
            "\"{}\" should not contain more than {} elements, got {}",
            field, max, count
        )));
    }
    Ok(())
}

/// Fails if two fields hold the same value.
pub fn not_equal<T>(field_a: &str, a: &T, field_b: &str, b: &T) -> Result<()>
where
    T: PartialEq,
{
    if a == b {
        return Err(ApiError::param(format!(
            "\"{}\" and \"{}\" cannot be equal",
            field_a, field_b
        )));
    }
    Ok(())
}

/// Checks a taxpayer number: 10 digits for companies, 12 for individuals.
pub fn inn(field: &str, value: &str) -> Result<()> {
    let digits_only = value.chars().all(|c| c.is_ascii_digit());
    if !digits_only || !(value.len() == 10 || value.len() == 12) {
        return Err(ApiError::param(format!(
            "\"{}\" should consist of 10 or 12 digits",
            field
        )));
    }
    Ok(())
}

/// Checks a marking code: 32 uppercase hex bytes separated by spaces.
pub fn product_code(field: &str, value: &str) -> Result<()> {
    if !PRODUCT_CODE_RE.is_match(value) {
        return Err(ApiError::param(format!("\"{}\" is in a wrong format", field)));
    }
    Ok(())
}

/// Checks an ISO 3166-1 alpha-2 country code such as `RU`.
pub fn country_code(field: &str, value: &str) -> Result<()> {
    if !COUNTRY_CODE_RE.is_match(value) {
        return Err(ApiError::param(format!(
            "\"{}\" should be a two-letter uppercase country code",
            field
        )));
    }
    Ok(())
}

/// Checks an ISO 8601 timestamp with offset, e.g. `2020-01-01T00:00:00+00:00`.
pub fn datetime(field: &str, value: &str) -> Result<()> {
    chrono::DateTime::parse_from_rfc3339(value).map_err(|_| {
        ApiError::param(format!(
            "\"{}\" should be an ISO 8601 date-time with offset, got {}",
            field, value
        ))
    })?;
    Ok(())
}

/// Checks a `[lon, lat]` coordinates pair.
pub fn coordinates(field: &str, value: &[f64]) -> Result<()> {
    if value.len() != 2 {
        return Err(ApiError::param(format!(
            "\"{}\" should contain exactly 2 elements, got {}",
            field,
            value.len()
        )));
    }
    in_range(&format!("{}[0] (longitude)", field), value[0], -180.0, 180.0)?;
    in_range(&format!("{}[1] (latitude)", field), value[1], -90.0, 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_str() {
        assert_eq!(
            required_str("claim_accept", "claim_id", "claim_id", Some("abc")).unwrap(),
            "abc"
        );
        let err = required_str("claim_accept", "claim_id", "claim_id", Some("  ")).unwrap_err();
        assert!(matches!(err, ApiError::Param(_)));
        let err = required_str("claim_create", "emergency_contact_name", "emergency_contact.name", None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: <emergency_contact_name> (emergency_contact.name) of <claim_create> is a required parameter"
        );
    }

    #[test]
    fn test_in_range_bounds() {
        assert!(in_range("limit", 1, 1, 1000).is_ok());
        assert!(in_range("limit", 1000, 1, 1000).is_ok());
        assert!(in_range("limit", 0, 1, 1000).is_err());
        assert!(in_range("limit", 1001, 1, 1000).is_err());
        assert!(in_range("lat", f64::NAN, -90.0, 90.0).is_err());
        assert!(at_least("excise", f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_positive_rejects_nan() {
        assert!(positive("weight", 0.1).is_ok());
        assert!(positive("weight", 0.0).is_err());
        assert!(positive("weight", f64::NAN).is_err());
    }

    #[test]
    fn test_lengths() {
        assert!(exact_length("cost_currency", "RUB", 3).is_ok());
        assert!(exact_length("cost_currency", "RU", 3).is_err());
        assert!(exact_length("cost_currency", "RUBL", 3).is_err());
        assert!(length_between("customs_declaration_number", "1", 1, 32).is_ok());
        assert!(length_between("customs_declaration_number", "", 1, 32).is_err());
        assert!(length_between("customs_declaration_number", &"9".repeat(33), 1, 32).is_err());
    }

    #[test]
    fn test_count_between() {
        assert!(count_between("route_points", 2, 2, usize::MAX).is_ok());
        let err = count_between("route_points", 1, 2, usize::MAX).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
        assert!(count_between("claim_ids", 1001, 1, 1000).is_err());
    }

    #[test]
    fn test_inn() {
        assert!(inn("inn", "7707083893").is_ok());
        assert!(inn("inn", "500100732259").is_ok());
        assert!(inn("inn", "12345").is_err());
        assert!(inn("inn", "77070838AB").is_err());
    }

    #[test]
    fn test_product_code() {
        let valid = "00 00 00 01 00 21 FA 41 00 23 05 41 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 12 00 AB 00";
        assert!(product_code("product_code", valid).is_ok());
        assert!(product_code("product_code", &valid.to_lowercase()).is_err());
        assert!(product_code("product_code", "00 01").is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(coordinates("coordinates", &[37.6, 55.7]).is_ok());
        assert!(coordinates("coordinates", &[37.6]).is_err());
        assert!(coordinates("coordinates", &[37.6, 55.7, 1.0]).is_err());
        assert!(coordinates("coordinates", &[37.6, 95.0]).is_err());
        assert!(coordinates("coordinates", &[f64::NAN, 55.7]).is_err());
        assert!(coordinates("coordinates", &[37.6, f64::NAN]).is_err());
        assert!(coordinates("coordinates", &[f64::INFINITY, 55.7]).is_err());
    }

    #[test]
    fn test_datetime() {
        assert!(datetime("due", "2020-01-01T00:00:00+00:00").is_ok());
        assert!(datetime("due", "2020-01-01T00:00:00Z").is_ok());
        assert!(datetime("due", "tomorrow").is_err());
        assert!(datetime("due", "2020-01-01").is_err());
    }

    #[test]
    fn test_country_code() {
        assert!(country_code("country_of_origin_code", "RU").is_ok());
        assert!(country_code("country_of_origin_code", "ru").is_err());
        assert!(country_code("country_of_origin_code", "RUS").is_err());
    }
}
