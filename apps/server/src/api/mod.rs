use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Router};
use chrono::NaiveDateTime;
use fintrack_core::utils::time_utils::parse_date_param;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth::require_jwt, config::Config, error::ApiResult, main_lib::AppState};

mod admin;
mod budgets;
mod currency;
mod dashboard;
mod goals;
mod notifications;
mod reports;
mod transactions;

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn readyz() -> &'static str {
    "ok"
}

/// Parses an optional date query parameter; blank values count as absent.
pub(crate) fn optional_date(raw: Option<&str>) -> ApiResult<Option<NaiveDateTime>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => Ok(Some(parse_date_param(value)?)),
        None => Ok(None),
    }
}

/// Wraps a message into the `{ "message": ... }` body used by acknowledgements.
pub(crate) fn message(text: &str) -> serde_json::Value {
    serde_json::json!({ "message": text })
}

pub(crate) fn not_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().with_context(|| format!("Invalid CORS origin '{o}'")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let protected = Router::new()
        .merge(transactions::router())
        .merge(budgets::router())
        .merge(goals::router())
        .merge(reports::router())
        .merge(notifications::router())
        .merge(currency::router())
        .merge(dashboard::router())
        .merge(admin::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(protected);

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
