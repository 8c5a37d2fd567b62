use std::sync::Arc;

use crate::{api::message, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use fintrack_core::goals::{AllocationSummary, GoalStatistics, GoalUpdate, GoalView, NewGoal};
use fintrack_core::users::UserContext;

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<Vec<GoalView>>> {
    Ok(Json(state.goal_service.get_goals(&ctx)?))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<GoalView>)> {
    let g = state.goal_service.create_goal(&ctx, goal).await?;
    Ok((StatusCode::CREATED, Json(g)))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<GoalView>> {
    let g = state.goal_service.update_goal(&ctx, &id, update).await?;
    Ok(Json(g))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<serde_json::Value>> {
    state.goal_service.delete_goal(&ctx, &id).await?;
    Ok(Json(message("Goal removed")))
}

async fn auto_allocate_savings(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<AllocationSummary>> {
    Ok(Json(state.goal_service.auto_allocate_savings(&ctx).await?))
}

async fn get_goal_statistics(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<GoalStatistics>> {
    Ok(Json(state.goal_service.get_goal_statistics(&ctx)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/auto-allocate", post(auto_allocate_savings))
        .route("/goals/stats", get(get_goal_statistics))
        .route("/goals/{id}", put(update_goal).delete(delete_goal))
}
