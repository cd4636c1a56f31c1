//! Authentication stubs
//!
//! Login and registration return fixed payloads until accounts exist.

pub mod routes;

pub use routes::auth_routes;
