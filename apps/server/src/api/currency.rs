use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use fintrack_core::currency::{CurrencyPreference, CurrencyPreferenceInput, ExchangeRates};
use fintrack_core::users::UserContext;

async fn set_preferred_currencies(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(input): Json<CurrencyPreferenceInput>,
) -> ApiResult<Json<CurrencyPreference>> {
    let saved = state
        .currency_service
        .set_preferred_currencies(&ctx, input)
        .await?;
    Ok(Json(saved))
}

async fn get_exchange_rates(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<ExchangeRates>> {
    Ok(Json(state.currency_service.get_exchange_rates(&ctx).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currency", post(set_preferred_currencies))
        .route("/currency/exchange-rates", get(get_exchange_rates))
}
