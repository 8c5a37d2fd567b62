//! Report models.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
}

/// Per-category totals, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub income: BTreeMap<String, f64>,
    pub expense: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    /// Keyed by `YYYY-MM`.
    pub monthly: BTreeMap<String, MonthlyTotals>,
    pub by_category: CategorySummary,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

/// Window selection for the visualization report.
///
/// An explicit start and end take precedence over `period`.
#[derive(Debug, Clone, Default)]
pub struct VisualizationQuery {
    pub period: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

impl VisualizationQuery {
    pub fn custom_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.start_date.zip(self.end_date)
    }

    /// Label echoed back to the client.
    pub fn label(&self) -> String {
        match (&self.period, self.custom_range()) {
            (Some(period), _) => period.clone(),
            (None, Some(_)) => "custom".to_string(),
            (None, None) => "all".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationData {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub category_summary: CategorySummary,
    pub monthly_data: BTreeMap<String, MonthlyTotals>,
    pub period: String,
}

impl VisualizationData {
    pub fn from_summary(summary: SpendingSummary, period: String) -> Self {
        VisualizationData {
            total_income: summary.total_income,
            total_expenses: summary.total_expense,
            balance: summary.balance,
            category_summary: summary.by_category,
            monthly_data: summary.monthly,
            period,
        }
    }
}
