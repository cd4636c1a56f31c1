//! Error types for Hamlet

use thiserror::Error;

/// Result type alias for Hamlet operations
pub type Result<T> = std::result::Result<T, HamletError>;

/// Main error type for Hamlet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HamletError {
    /// Source gender token not present in the gender table
    #[error("Invalid gender value: \"{0}\"")]
    InvalidGender(String),

    /// Text did not match any canonical variant name of an enum
    #[error("Invalid {kind} value: \"{value}\"")]
    UnknownVariant { kind: &'static str, value: String },
}

impl HamletError {
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
