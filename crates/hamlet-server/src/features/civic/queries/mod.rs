pub mod get_governorate;
pub mod list_governorates;
pub mod list_parties;

pub use get_governorate::{GetGovernorateError, GetGovernorateQuery, GetGovernorateResponse};
pub use list_governorates::ListGovernoratesError;
pub use list_parties::{ListPartiesError, PartyListItem};
