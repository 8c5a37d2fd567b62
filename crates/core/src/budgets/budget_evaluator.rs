//! Budget evaluation over a user's budgets and expense history.
//!
//! Both functions are pure: callers load the records, pass them in, and
//! decide what to persist.

use chrono::NaiveDateTime;

use crate::budgets::budgets_model::{Budget, BudgetRecommendation, BudgetStatus};
use crate::constants::RECOMMENDATION_WINDOW_MONTHS;
use crate::transactions::Transaction;
use crate::utils::time_utils::months_before;

pub const WITHIN_LIMITS_MESSAGE: &str = "All budgets are within limits.";

const INCREASE_ABOVE_PERCENT: f64 = 110.0;
const REDUCE_BELOW_PERCENT: f64 = 70.0;

fn expense_total<'a>(
    expenses: impl IntoIterator<Item = &'a Transaction>,
    category: &str,
) -> f64 {
    expenses
        .into_iter()
        .filter(|t| t.is_expense() && t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// Reports the first budget, in input order, whose lifetime spending has
/// reached its alert threshold.
///
/// Later offenders are not reported. Budgets with a non-positive amount
/// are skipped.
pub fn check_status(budgets: &[Budget], expenses: &[Transaction]) -> BudgetStatus {
    for budget in budgets.iter().filter(|b| b.amount > 0.0) {
        let spent = expense_total(expenses, &budget.category);
        let percent_used = spent * 100.0 / budget.amount;
        if percent_used >= budget.alert_threshold {
            return BudgetStatus {
                message: format!(
                    "Alert: You have spent {}% of your budget for {}.",
                    percent_used.round(),
                    budget.category
                ),
            };
        }
    }
    BudgetStatus {
        message: WITHIN_LIMITS_MESSAGE.to_string(),
    }
}

/// Compares each budget with the monthly average of the last three calendar
/// months of spending in its category.
///
/// The divisor is always three, even when less history exists.
pub fn recommend(
    budgets: &[Budget],
    expenses: &[Transaction],
    now: NaiveDateTime,
) -> Vec<BudgetRecommendation> {
    let window_start = months_before(now, RECOMMENDATION_WINDOW_MONTHS);
    budgets
        .iter()
        .filter(|b| b.amount > 0.0)
        .map(|budget| {
            let total = expense_total(
                expenses.iter().filter(|t| t.date >= window_start),
                &budget.category,
            );
            let average = total / f64::from(RECOMMENDATION_WINDOW_MONTHS);
            let percent = average * 100.0 / budget.amount;
            BudgetRecommendation {
                budget_id: budget.id.clone(),
                category: budget.category.clone(),
                recommendation: recommendation_text(&budget.category, percent),
                current_budget: budget.amount,
                average_spending: average,
                percent_of_budget: percent.round() as i64,
            }
        })
        .collect()
}

fn recommendation_text(category: &str, percent: f64) -> String {
    if percent > INCREASE_ABOVE_PERCENT {
        format!(
            "Consider increasing your {category} budget by {}% based on your 3-month average spending.",
            (percent - 100.0).ceil()
        )
    } else if percent < REDUCE_BELOW_PERCENT {
        format!(
            "You might be able to reduce your {category} budget by {}% based on your 3-month spending patterns.",
            (100.0 - percent).floor()
        )
    } else {
        format!("Your {category} budget is well-aligned with your spending habits.")
    }
}
