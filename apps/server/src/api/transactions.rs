use std::sync::Arc;

use crate::{
    api::{message, not_blank},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::notifications::RecurringNotifications;
use fintrack_core::transactions::{
    NewTransaction, SortOrder, Transaction, TransactionFilter, TransactionSort,
    TransactionSortField, TransactionType, TransactionUpdate,
};
use fintrack_core::users::UserContext;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionListQuery {
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
    category: Option<String>,
    tags: Option<String>,
    sort_by: Option<TransactionSortField>,
    order: Option<SortOrder>,
}

impl TransactionListQuery {
    fn into_parts(self) -> (TransactionFilter, Option<TransactionSort>) {
        let filter = TransactionFilter {
            transaction_type: self.transaction_type,
            category: not_blank(self.category),
            tags: self
                .tags
                .as_deref()
                .map(TransactionFilter::parse_tags)
                .unwrap_or_default(),
            ..TransactionFilter::default()
        };
        let sort = self.sort_by.map(|field| TransactionSort {
            field,
            order: self.order.unwrap_or_default(),
        });
        (filter, sort)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationsQuery {
    upcoming_days: Option<i64>,
}

async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<TransactionListQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let (filter, sort) = query.into_parts();
    let transactions = state
        .transaction_service
        .get_transactions(&ctx, &filter, sort)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(new_transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state
        .transaction_service
        .create_transaction(&ctx, new_transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Json(update): Json<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let updated = state
        .transaction_service
        .update_transaction(&ctx, &id, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<serde_json::Value>> {
    state.transaction_service.delete_transaction(&ctx, &id).await?;
    Ok(Json(message("Transaction removed")))
}

async fn get_recurring_transactions(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(
        state.transaction_service.get_recurring_transactions(&ctx)?,
    ))
}

async fn get_recurring_notifications(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<NotificationsQuery>,
) -> ApiResult<Json<RecurringNotifications>> {
    let notifications = state
        .transaction_service
        .get_recurring_notifications(&ctx, query.upcoming_days)?;
    Ok(Json(notifications))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(get_transactions).post(create_transaction),
        )
        .route("/transactions/recurring", get(get_recurring_transactions))
        .route(
            "/transactions/notifications",
            get(get_recurring_notifications),
        )
        .route(
            "/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
}
