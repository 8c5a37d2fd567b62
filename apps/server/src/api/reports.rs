use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    api::{not_blank, optional_date},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use fintrack_core::reports::{MonthlyTotals, VisualizationData, VisualizationQuery};
use fintrack_core::transactions::{Transaction, TransactionFilter, TransactionType};
use fintrack_core::users::UserContext;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisualQuery {
    period: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl VisualQuery {
    fn into_query(self) -> ApiResult<VisualizationQuery> {
        Ok(VisualizationQuery {
            period: not_blank(self.period),
            start_date: optional_date(self.start_date.as_deref())?,
            end_date: optional_date(self.end_date.as_deref())?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    category: Option<String>,
    tags: Option<String>,
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
    min_amount: Option<f64>,
    max_amount: Option<f64>,
}

impl FilterQuery {
    /// The date range applies only when both ends are given.
    fn into_filter(self) -> ApiResult<TransactionFilter> {
        let start = optional_date(self.start_date.as_deref())?;
        let end = optional_date(self.end_date.as_deref())?;
        let (start_date, end_date) = match (start, end) {
            (Some(start), Some(end)) => (Some(start), Some(end)),
            _ => (None, None),
        };
        Ok(TransactionFilter {
            transaction_type: self.transaction_type,
            category: not_blank(self.category),
            tags: self
                .tags
                .as_deref()
                .map(TransactionFilter::parse_tags)
                .unwrap_or_default(),
            start_date,
            end_date,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            recurring_only: false,
        })
    }
}

async fn get_spending_trends(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
) -> ApiResult<Json<BTreeMap<String, MonthlyTotals>>> {
    Ok(Json(state.report_service.get_spending_trends(&ctx)?))
}

async fn get_filtered_report(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = query.into_filter()?;
    Ok(Json(state.report_service.get_filtered_report(&ctx, &filter)?))
}

async fn get_visualization_data(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<VisualQuery>,
) -> ApiResult<Json<VisualizationData>> {
    let query = query.into_query()?;
    Ok(Json(
        state.report_service.get_visualization_data(&ctx, &query)?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/trends", get(get_spending_trends))
        .route("/reports/filter", get(get_filtered_report))
        .route("/reports/visual", get(get_visualization_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sided_date_range_is_dropped() {
        let filter = FilterQuery {
            start_date: Some("2026-01-01".into()),
            min_amount: Some(10.0),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.start_date, None);
        assert_eq!(filter.end_date, None);
        assert_eq!(filter.min_amount, Some(10.0));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let result = VisualQuery {
            start_date: Some("yesterday".into()),
            end_date: Some("2026-01-31".into()),
            ..Default::default()
        }
        .into_query();
        assert!(result.is_err());
    }
}
