//! Shared validation utilities
//!
//! Query strings are deserialized as raw `Option<String>` fields and then
//! checked here, so every bad parameter of a request is reported together
//! instead of failing on the first one.
//!
//! # Examples
//!
//! ```rust,ignore
//! use hamlet_server::features::shared::validation::{parse_integer, ValidationErrors};
//!
//! let mut errors = ValidationErrors::default();
//! let page = parse_integer(&mut errors, "page", params.page.as_deref());
//! errors.into_result()?;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One rejected query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulated field errors for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok(())` when nothing was rejected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Trimmed value, or `None` when absent or blank
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an optional integer parameter, recording an error if it is not a number
pub fn parse_integer(errors: &mut ValidationErrors, field: &str, raw: Option<&str>) -> Option<i64> {
    let value = non_blank(raw)?;
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, format!("Expected number, received '{}'", value));
            None
        },
    }
}

/// Parse an optional parameter restricted to a fixed set of values
pub fn parse_choice<T: FromStr>(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    expected: &[&str],
) -> Option<T> {
    let value = non_blank(raw)?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            let expected = expected
                .iter()
                .map(|v| format!("'{}'", v))
                .collect::<Vec<_>>()
                .join(" | ");
            errors.add(
                field,
                format!("Invalid enum value. Expected {}, received '{}'", expected, value),
            );
            None
        },
    }
}
