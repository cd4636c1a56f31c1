pub mod queries;
pub mod routes;

pub use queries::{
    CandidateListItem, CandidateStatsResponse, GetCandidateQuery, GetCandidateResponse,
    ListCandidatesParams, ListCandidatesResponse, TrendingCandidate, TrendingCandidatesParams,
};

pub use routes::candidates_routes;
