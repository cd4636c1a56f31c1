use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::api::response::ComingSoon;

#[derive(Debug, Clone, Serialize)]
pub struct EmptyList {
    pub data: Vec<serde_json::Value>,
}

pub fn social_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/posts", get(coming_soon))
        .route("/events", get(coming_soon))
        .route("/debates", get(coming_soon))
}

async fn coming_soon() -> Json<ComingSoon<EmptyList>> {
    Json(ComingSoon {
        message: "Social features coming soon",
        payload: EmptyList { data: Vec::new() },
    })
}
