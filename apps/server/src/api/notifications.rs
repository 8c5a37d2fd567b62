use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use fintrack_core::notifications::{Reminders, SpendingAlerts};
use fintrack_core::users::UserContext;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BillReminderQuery {
    days_ahead: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GoalReminderQuery {
    threshold: Option<i64>,
}

async fn spending_alerts(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<SpendingAlerts>> {
    Ok(Json(state.notification_service.spending_alerts(&ctx)?))
}

async fn bill_reminders(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<BillReminderQuery>,
) -> ApiResult<Json<Reminders>> {
    Ok(Json(
        state
            .notification_service
            .bill_reminders(&ctx, query.days_ahead)?,
    ))
}

async fn goal_reminders(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<GoalReminderQuery>,
) -> ApiResult<Json<Reminders>> {
    Ok(Json(
        state
            .notification_service
            .goal_reminders(&ctx, query.threshold)?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications/spending-alerts", get(spending_alerts))
        .route("/notifications/bill-reminders", get(bill_reminders))
        .route("/notifications/goal-reminders", get(goal_reminders))
}
