//! Civic reference data: governorates and parties

pub mod queries;
pub mod routes;

pub use queries::{GetGovernorateResponse, PartyListItem};
pub use routes::civic_routes;
