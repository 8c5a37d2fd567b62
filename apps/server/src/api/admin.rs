use std::sync::Arc;

use crate::{api::message, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::users::{NewUser, User, UserContext, UserUpdate};
use serde_json::json;

async fn get_users(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.user_service.get_users(&ctx)?))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(new_user): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.user_service.create_user(&ctx, new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = state.user_service.update_user(&ctx, &id, update).await?;
    Ok(Json(
        json!({ "message": "User updated successfully", "user": user }),
    ))
}

async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<serde_json::Value>> {
    state.user_service.delete_user(&ctx, &id).await?;
    Ok(Json(message("User deleted successfully")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/users", get(get_users).post(create_user))
        .route("/admin/users/{id}", put(update_user).delete(delete_user))
}
