//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **pagination**: page requests and the `{data, pagination}` envelope
//! - **validation**: query parameter validation with field-level errors
//! - **error_helpers**: database constraint classification

pub mod error_helpers;
pub mod pagination;
pub mod validation;

// Re-export commonly used types
pub use pagination::{PageRequest, Paginated, PaginationMetadata};
pub use validation::{FieldError, ValidationErrors};
