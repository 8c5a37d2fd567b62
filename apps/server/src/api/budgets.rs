use std::sync::Arc;

use crate::{api::message, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::budgets::{Budget, BudgetStatus, BudgetUpdate, NewBudget};
use fintrack_core::users::UserContext;
use serde_json::json;

async fn get_budgets(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<Vec<Budget>>> {
    Ok(Json(state.budget_service.get_budgets(&ctx)?))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(new_budget): Json<NewBudget>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let budget = state.budget_service.create_budget(&ctx, new_budget).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(update): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    let budget = state
        .budget_service
        .update_budget(&ctx, &id, update)
        .await?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<serde_json::Value>> {
    state.budget_service.delete_budget(&ctx, &id).await?;
    Ok(Json(message("Budget removed")))
}

async fn check_budget_status(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<BudgetStatus>> {
    Ok(Json(state.budget_service.check_budget_status(&ctx)?))
}

async fn get_budget_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<serde_json::Value>> {
    let recommendations = state
        .budget_service
        .get_budget_recommendations(&ctx)
        .await?;
    Ok(Json(json!({ "recommendations": recommendations })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(get_budgets).post(create_budget))
        .route("/budgets/status", get(check_budget_status))
        .route("/budgets/recommendations", get(get_budget_recommendations))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}
