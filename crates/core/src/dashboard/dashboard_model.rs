use serde::Serialize;

use crate::budgets::Budget;
use crate::goals::GoalView;

/// Global record counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_users: i64,
    pub total_transactions: i64,
    pub total_budgets: i64,
    pub total_goals: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub budgets: Vec<Budget>,
    pub goals: Vec<GoalView>,
}
