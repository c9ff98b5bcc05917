//
//  yacargo
//  api/common/fields.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Flat argument names and their nested wire paths.
//!
//! Operations take flat arguments such as `emergency_contact_name` and
//! `emergency_contact_phone`, while the wire format nests them:
//!
//! ```json
//! {"emergency_contact": {"name": "Rick", "phone": "+79000000000"}}
//! ```
//!
//! The mapping lives in [`FieldPath`] constants next to each operation, so
//! it is data rather than string splitting. [`JsonBody`] nests values along
//! those paths when a request is built, and [`FieldPath::dotted`] names the
//! wire location in parameter errors.
//!
//! # Example
//!
//! ```rust
//! use yacargo::api::common::{FieldPath, JsonBody};
//!
//! const CONTACT_NAME: FieldPath = FieldPath::new("emergency_contact_name", &["emergency_contact", "name"]);
//!
//! let mut body = JsonBody::new();
//! body.insert(&CONTACT_NAME, "Rick").unwrap();
//! let json = body.into_value();
//! assert_eq!(json["emergency_contact"]["name"], "Rick");
//! assert_eq!(CONTACT_NAME.dotted(), "emergency_contact.name");
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use super::ApiError;

/// A flat argument name bound to its nested location in the JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    /// Flat argument name, e.g. `client_requirements_taxi_class`.
    pub name: &'static str,
    /// Wire path, e.g. `["client_requirements", "taxi_class"]`.
    pub path: &'static [&'static str],
}

impl FieldPath {
    /// Creates a field path. `path` must not be empty.
    pub const fn new(name: &'static str, path: &'static [&'static str]) -> Self {
        Self { name, path }
    }

    /// Returns the wire path joined with dots, e.g. `emergency_contact.name`.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// A JSON object assembled field by field along [`FieldPath`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonBody {
    root: Map<String, Value>,
}

impl JsonBody {
    /// Creates an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` and stores it at `field.path`, creating the
    /// intermediate objects.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Param`] if an intermediate segment already holds
    /// a non-object value, and [`ApiError::Decode`] if `value` cannot be
    /// serialized.
    pub fn insert<T>(&mut self, field: &FieldPath, value: &T) -> Result<(), ApiError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        let Some((last, parents)) = field.path.split_last() else {
            return Err(ApiError::param(format!("\"{}\" has an empty wire path", field.name)));
        };

        let mut node = &mut self.root;
        for segment in parents {
            let next = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match next {
                Value::Object(map) => map,
                _ => {
                    return Err(ApiError::param(format!(
                        "\"{}\" conflicts with an existing value at \"{}\"",
                        field.name, segment
                    )))
                }
            };
        }
        node.insert(last.to_string(), value);
        Ok(())
    }

    /// Stores `value` only when it is present.
    pub fn insert_opt<T>(&mut self, field: &FieldPath, value: Option<&T>) -> Result<(), ApiError>
    where
        T: Serialize + ?Sized,
    {
        match value {
            Some(v) => self.insert(field, v),
            None => Ok(()),
        }
    }

    /// Consumes the body, returning the JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}
