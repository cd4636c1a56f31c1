pub mod get;
pub mod list;
pub mod stats;
pub mod trending;

pub use get::{GetCandidateError, GetCandidateQuery, GetCandidateResponse};
pub use list::{
    CandidateFilters, CandidateListItem, ListCandidatesError, ListCandidatesParams,
    ListCandidatesQuery, ListCandidatesResponse,
};
pub use stats::{CandidateStatsError, CandidateStatsResponse};
pub use trending::{TrendingCandidate, TrendingCandidatesError, TrendingCandidatesParams};
