//! Rate limiting middleware using tower-governor
//!
//! A window of `window_ms` allowing `max_requests` is expressed as a token
//! bucket of `max_requests` tokens refilled one every `window_ms / max_requests`
//! milliseconds. Clients are keyed by peer IP, so the server must be run with
//! `into_make_service_with_connect_info::<SocketAddr>()`.
//!
//! Rejections use the standard JSON error body.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};

use crate::api::response::ErrorResponse;
use crate::config::RateLimitConfig;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Render a governor rejection as `{error, message}`
pub fn rejection_response(error: GovernorError) -> Response {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorResponse::new("Too Many Requests", RATE_LIMIT_MESSAGE)),
            )
                .into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(wait_time));
            response
        },
        GovernorError::UnableToExtractKey => {
            tracing::error!("Rate limiter could not determine the client address");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Internal Server Error",
                    "Unable to identify client",
                )),
            )
                .into_response()
        },
        GovernorError::Other { code, msg, headers } => {
            let reason = code.canonical_reason().unwrap_or("Error");
            let mut response = (
                code,
                Json(ErrorResponse::new(reason, msg.unwrap_or_else(|| reason.to_string()))),
            )
                .into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        },
    }
}

/// Milliseconds between token refills
pub fn replenishment_interval_ms(config: &RateLimitConfig) -> u64 {
    (config.window_ms / u64::from(config.max_requests.max(1))).max(1)
}

/// Wrap `router` in the governor layer, or return it unchanged when disabled
pub fn apply(router: Router, config: &RateLimitConfig) -> anyhow::Result<Router> {
    if !config.enabled {
        tracing::info!("Rate limiting disabled");
        return Ok(router);
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenishment_interval_ms(config))
        .burst_size(config.max_requests)
        .error_handler(rejection_response)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration: {:?}", config))?;

    tracing::info!(
        window_ms = config.window_ms,
        max_requests = config.max_requests,
        "Rate limiting enabled"
    );

    Ok(router.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}
