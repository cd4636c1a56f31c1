//! Hamlet Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
//!
//! Shared domain types, normalization rules and logging setup for the
//! Hamlet election candidate workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`HamletError`] and the crate [`Result`] alias
//! - **Types**: gender, nomination type and candidate status enums
//! - **Normalization**: lookup tables that map raw multilingual source text
//!   to those enums and to canonical governorate names
//! - **Logging**: tracing subscriber configuration shared by every binary
//!
//! # Example
//!
//! ```
//! use hamlet_common::normalize::{normalize_governorate, parse_gender};
//! use hamlet_common::types::Gender;
//!
//! assert_eq!(normalize_governorate("  BAGDAD "), Some("Baghdad"));
//! assert_eq!(parse_gender("ذكر").unwrap(), Gender::Male);
//! ```

pub mod error;
pub mod logging;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use error::{HamletError, Result};
