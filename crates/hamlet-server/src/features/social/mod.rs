//! Social feature stubs: posts, events and debates are not persisted yet.

pub mod routes;

pub use routes::social_routes;
