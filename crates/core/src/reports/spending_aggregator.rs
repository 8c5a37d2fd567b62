//! Groups transactions by calendar month and by category.

use std::collections::BTreeMap;

use crate::reports::reports_model::{MonthlyTotals, SpendingSummary};
use crate::transactions::{Transaction, TransactionType};
use crate::utils::time_utils::month_key;

pub fn aggregate(transactions: &[Transaction]) -> SpendingSummary {
    let mut summary = SpendingSummary::default();
    for tx in transactions {
        let month = summary.monthly.entry(month_key(tx.date)).or_default();
        match tx.transaction_type {
            TransactionType::Income => {
                summary.total_income += tx.amount;
                month.income += tx.amount;
                *summary
                    .by_category
                    .income
                    .entry(tx.category.clone())
                    .or_default() += tx.amount;
            }
            TransactionType::Expense => {
                summary.total_expense += tx.amount;
                month.expense += tx.amount;
                *summary
                    .by_category
                    .expense
                    .entry(tx.category.clone())
                    .or_default() += tx.amount;
            }
        }
    }
    summary.balance = summary.total_income - summary.total_expense;
    summary
}

/// Month-by-month income and expense totals only.
pub fn monthly_trends(transactions: &[Transaction]) -> BTreeMap<String, MonthlyTotals> {
    aggregate(transactions).monthly
}
