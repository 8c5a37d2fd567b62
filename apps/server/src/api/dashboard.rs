use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Extension, Json, Router};
use fintrack_core::dashboard::{AdminDashboard, UserDashboard};
use fintrack_core::users::UserContext;

async fn get_admin_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<AdminDashboard>> {
    Ok(Json(state.dashboard_service.get_admin_dashboard(&ctx)?))
}

async fn get_user_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<UserDashboard>> {
    Ok(Json(state.dashboard_service.get_user_dashboard(&ctx)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/admin", get(get_admin_dashboard))
        .route("/dashboard/user", get(get_user_dashboard))
}
