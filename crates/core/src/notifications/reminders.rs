//! Threshold alerts and date-window reminders.
//!
//! Every function takes `now` explicitly; windows are inclusive at both ends.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::constants::SPENDING_ALERT_THRESHOLD;
use crate::goals::Goal;
use crate::notifications::notifications_model::{RecurringNotifications, Reminder};
use crate::transactions::Transaction;
use crate::utils::time_utils::{day_label, days_after};

fn within(date: NaiveDateTime, now: NaiveDateTime, days: i64) -> bool {
    date >= now && date <= days_after(now, days)
}

fn by_date(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by_key(|t| t.date);
    transactions
}

/// One alert per expense category whose lifetime total exceeds the threshold.
pub fn spending_alerts(transactions: &[Transaction]) -> Vec<String> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(tx.category.as_str()).or_default() += tx.amount;
    }
    totals
        .into_iter()
        .filter(|(_, total)| *total > SPENDING_ALERT_THRESHOLD)
        .map(|(category, total)| format!("High spending detected in {category}: ${total}"))
        .collect()
}

pub fn bill_reminders(
    transactions: &[Transaction],
    now: NaiveDateTime,
    days_ahead: i64,
) -> Vec<Reminder> {
    transactions
        .iter()
        .filter(|t| t.is_recurring && within(t.date, now, days_ahead))
        .map(|bill| Reminder {
            date: day_label(bill.date),
            message: format!("Upcoming bill: {} - ${}", bill.category, bill.amount),
        })
        .collect()
}

/// Reminders for goals due within `threshold_days`, using uncapped progress.
pub fn goal_reminders(goals: &[Goal], now: NaiveDateTime, threshold_days: i64) -> Vec<Reminder> {
    goals
        .iter()
        .filter(|g| within(g.deadline, now, threshold_days))
        .map(|goal| Reminder {
            date: day_label(goal.deadline),
            message: format!(
                "Goal \"{}\": ${} of ${} ({:.0}%)",
                goal.title,
                goal.saved_amount,
                goal.target_amount,
                goal.raw_progress_percent()
            ),
        })
        .collect()
}

/// Splits recurring transactions into upcoming and missed occurrences.
///
/// Missed ones are dated before `now` and still active.
pub fn recurring_notifications(
    transactions: &[Transaction],
    now: NaiveDateTime,
    upcoming_days: i64,
) -> RecurringNotifications {
    let recurring = transactions.iter().filter(|t| t.is_recurring);
    let upcoming = by_date(
        recurring
            .clone()
            .filter(|t| within(t.date, now, upcoming_days))
            .cloned()
            .collect(),
    );
    let missed = by_date(
        recurring
            .filter(|t| t.date < now && t.recurrence_active_at(now))
            .cloned()
            .collect(),
    );
    RecurringNotifications {
        message: format!(
            "Found {} upcoming and {} missed recurring transactions",
            upcoming.len(),
            missed.len()
        ),
        upcoming,
        missed,
    }
}

pub fn active_recurring(transactions: &[Transaction], now: NaiveDateTime) -> Vec<Transaction> {
    by_date(
        transactions
            .iter()
            .filter(|t| t.recurrence_active_at(now))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalCategory;
    use crate::transactions::TransactionType;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn tx(category: &str, amount: f64, offset_days: i64, recurring: bool) -> Transaction {
        let date = now() + Duration::days(offset_days);
        Transaction {
            id: format!("{category}-{offset_days}"),
            user_id: "u1".into(),
            transaction_type: TransactionType::Expense,
            amount,
            category: category.into(),
            description: None,
            date,
            tags: vec![],
            is_recurring: recurring,
            recurrence_pattern: None,
            recurrence_end_date: None,
            created_at: date,
            updated_at: date,
        }
    }

    fn goal(title: &str, saved: f64, target: f64, offset_days: i64) -> Goal {
        Goal {
            id: title.into(),
            user_id: "u1".into(),
            title: title.into(),
            target_amount: target,
            saved_amount: saved,
            deadline: now() + Duration::days(offset_days),
            auto_allocate: false,
            allocation_percentage: 10.0,
            category: GoalCategory::Vacation,
            priority: 1,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn spending_alerts_only_fire_above_threshold() {
        let txs = vec![
            tx("Travel", 400.0, -3, false),
            tx("Travel", 150.0, -2, false),
            tx("Food", 500.0, -1, false),
        ];
        assert_eq!(
            spending_alerts(&txs),
            vec!["High spending detected in Travel: $550".to_string()]
        );
    }

    #[test]
    fn bill_reminders_cover_recurring_within_window() {
        let txs = vec![
            tx("Rent", 1200.0, 3, true),
            tx("Gym", 40.0, 9, true),
            tx("Coffee", 4.5, 2, false),
        ];
        let reminders = bill_reminders(&txs, now(), 7);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].date, "Thu Oct 22 2026");
        assert_eq!(reminders[0].message, "Upcoming bill: Rent - $1200");
        assert_eq!(bill_reminders(&txs, now(), 10).len(), 2);
    }

    #[test]
    fn huge_horizons_include_everything_ahead() {
        let txs = vec![tx("Rent", 1200.0, 3, true), tx("Gym", 40.0, 400, true)];
        assert_eq!(bill_reminders(&txs, now(), 1_000_000_000_000).len(), 2);
        assert_eq!(bill_reminders(&txs, now(), i64::MAX).len(), 2);

        let goals = vec![goal("Trip", 0.0, 1000.0, 10)];
        assert_eq!(goal_reminders(&goals, now(), i64::MAX).len(), 1);

        let notes = recurring_notifications(&txs, now(), 1_000_000_000_000);
        assert_eq!(notes.upcoming.len(), 2);
        assert!(bill_reminders(&txs, now(), i64::MIN).is_empty());
    }

    #[test]
    fn goal_reminders_use_uncapped_progress() {
        let goals = vec![
            goal("Trip", 1500.0, 1000.0, 10),
            goal("Later", 0.0, 1000.0, 45),
            goal("Past", 0.0, 1000.0, -1),
        ];
        let reminders = goal_reminders(&goals, now(), 30);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].message, "Goal \"Trip\": $1500 of $1000 (150%)");
    }

    #[test]
    fn recurring_split_into_upcoming_and_missed() {
        let mut lapsed = tx("Magazine", 10.0, -20, true);
        lapsed.recurrence_end_date = Some(now() - Duration::days(5));
        let mut ongoing = tx("Insurance", 90.0, -10, true);
        ongoing.recurrence_end_date = Some(now() + Duration::days(30));
        let txs = vec![
            tx("Rent", 1200.0, 5, true),
            tx("Phone", 30.0, 2, true),
            lapsed,
            ongoing,
            tx("Netflix", 15.0, -3, true),
        ];

        let result = recurring_notifications(&txs, now(), 7);
        let upcoming: Vec<_> = result.upcoming.iter().map(|t| t.category.as_str()).collect();
        let missed: Vec<_> = result.missed.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(upcoming, vec!["Phone", "Rent"]);
        assert_eq!(missed, vec!["Insurance", "Netflix"]);
        assert_eq!(
            result.message,
            "Found 2 upcoming and 2 missed recurring transactions"
        );

        let active: Vec<_> = active_recurring(&txs, now())
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(active, vec!["Insurance", "Netflix", "Phone", "Rent"]);
    }
}
