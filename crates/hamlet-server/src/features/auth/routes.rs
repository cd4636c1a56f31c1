use axum::{routing::post, Json, Router};
use serde::Serialize;

use crate::api::response::ComingSoon;

#[derive(Debug, Clone, Serialize)]
pub struct GuestUser {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginStub {
    pub user: GuestUser,
    pub token: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Empty {}

pub fn auth_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

async fn login() -> Json<ComingSoon<LoginStub>> {
    Json(ComingSoon {
        message: "Authentication coming soon",
        payload: LoginStub {
            user: GuestUser {
                id: "1",
                name: "Guest User",
                role: "Voter",
            },
            token: "stub-token",
        },
    })
}

async fn register() -> Json<ComingSoon<Empty>> {
    Json(ComingSoon {
        message: "Registration coming soon",
        payload: Empty {},
    })
}
