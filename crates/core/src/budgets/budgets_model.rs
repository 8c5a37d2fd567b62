//! Budget domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ALERT_THRESHOLD;
use crate::errors::{Error, Result};

/// Advisory budget period. Evaluation always uses lifetime or 3-month windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Weekly,
    Daily,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Daily => "daily",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "monthly" => Ok(BudgetPeriod::Monthly),
            "weekly" => Ok(BudgetPeriod::Weekly),
            "daily" => Ok(BudgetPeriod::Daily),
            other => Err(Error::invalid_input(format!(
                "Unknown budget period '{other}'"
            ))),
        }
    }
}

/// Domain model representing a spending limit for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub spent: f64,
    pub alert_threshold: f64,
    /// Latest recommendation text, replaced on every recommendation run.
    pub recommendations: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new budget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<BudgetPeriod>,
    pub alert_threshold: Option<f64>,
}

impl NewBudget {
    pub fn alert_threshold_or_default(&self) -> f64 {
        self.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<BudgetPeriod>,
    pub spent: Option<f64>,
    pub alert_threshold: Option<f64>,
}

impl BudgetUpdate {
    pub fn apply_to(self, budget: &mut Budget) {
        if let Some(category) = self.category {
            budget.category = category;
        }
        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if let Some(period) = self.period {
            budget.period = period;
        }
        if let Some(spent) = self.spent {
            budget.spent = spent;
        }
        if let Some(threshold) = self.alert_threshold {
            budget.alert_threshold = threshold;
        }
    }
}

/// Single status line produced by a budget check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    pub budget_id: String,
    pub category: String,
    pub recommendation: String,
    pub current_budget: f64,
    pub average_spending: f64,
    pub percent_of_budget: i64,
}
