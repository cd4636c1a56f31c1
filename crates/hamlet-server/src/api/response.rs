//! API response types
//!
//! Error bodies share one shape: `{error, message}` plus optional detail
//! fields. Successful list responses use
//! [`Paginated`](crate::features::shared::pagination::Paginated).

use serde::Serialize;

use crate::features::shared::validation::FieldError;

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Short error category, e.g. `Not Found`
    pub error: String,
    pub message: String,
    /// Field-level validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Constraint that caused a conflict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Debug rendering of the underlying error, outside production only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            field: None,
            stack: None,
        }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Fixed payload returned by endpoints that are not implemented yet
#[derive(Debug, Clone, Serialize)]
pub struct ComingSoon<T: Serialize> {
    pub message: &'static str,
    #[serde(flatten)]
    pub payload: T,
}
