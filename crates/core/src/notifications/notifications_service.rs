use std::sync::Arc;

use chrono::Utc;

use crate::constants::{DEFAULT_BILL_REMINDER_DAYS, DEFAULT_GOAL_REMINDER_DAYS};
use crate::errors::Result;
use crate::goals::GoalRepositoryTrait;
use crate::notifications::notifications_model::{Reminders, SpendingAlerts};
use crate::notifications::notifications_traits::NotificationServiceTrait;
use crate::notifications::reminders;
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait, TransactionType};
use crate::users::UserContext;

pub struct NotificationService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl NotificationService {
    pub fn new(
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        NotificationService {
            transaction_repo,
            goal_repo,
        }
    }
}

impl NotificationServiceTrait for NotificationService {
    fn spending_alerts(&self, ctx: &UserContext) -> Result<SpendingAlerts> {
        let expenses = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &TransactionFilter::of_type(TransactionType::Expense),
            None,
        )?;
        Ok(SpendingAlerts {
            alerts: reminders::spending_alerts(&expenses),
        })
    }

    fn bill_reminders(&self, ctx: &UserContext, days_ahead: Option<i64>) -> Result<Reminders> {
        let recurring = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &TransactionFilter::recurring(),
            None,
        )?;
        Ok(Reminders {
            reminders: reminders::bill_reminders(
                &recurring,
                Utc::now().naive_utc(),
                days_ahead.unwrap_or(DEFAULT_BILL_REMINDER_DAYS),
            ),
        })
    }

    fn goal_reminders(&self, ctx: &UserContext, threshold: Option<i64>) -> Result<Reminders> {
        let goals = self.goal_repo.find_goals(&ctx.user_id)?;
        Ok(Reminders {
            reminders: reminders::goal_reminders(
                &goals,
                Utc::now().naive_utc(),
                threshold.unwrap_or(DEFAULT_GOAL_REMINDER_DAYS),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::MockGoalRepository;
    use crate::transactions::{MockTransactionRepository, Transaction};
    use crate::users::UserRole;
    use chrono::Duration;

    fn bill(user_id: &str, amount: f64, days: i64) -> Transaction {
        let date = Utc::now().naive_utc() + Duration::days(days);
        Transaction {
            id: format!("{user_id}-{days}"),
            user_id: user_id.into(),
            transaction_type: TransactionType::Expense,
            amount,
            category: "Utilities".into(),
            description: None,
            date,
            tags: vec![],
            is_recurring: true,
            recurrence_pattern: None,
            recurrence_end_date: None,
            created_at: date,
            updated_at: date,
        }
    }

    fn service() -> NotificationService {
        NotificationService::new(
            Arc::new(MockTransactionRepository::with(vec![
                bill("alice", 300.0, 2),
                bill("alice", 300.0, 12),
                bill("bob", 900.0, 1),
            ])),
            Arc::new(MockGoalRepository::default()),
        )
    }

    #[test]
    fn bill_reminder_window_defaults_to_a_week() {
        let alice = UserContext::new("alice", UserRole::User);
        assert_eq!(service().bill_reminders(&alice, None).unwrap().reminders.len(), 1);
        assert_eq!(
            service().bill_reminders(&alice, Some(14)).unwrap().reminders.len(),
            2
        );
    }

    #[test]
    fn alerts_are_per_user() {
        let alice = UserContext::new("alice", UserRole::User);
        let bob = UserContext::new("bob", UserRole::User);
        assert_eq!(
            service().spending_alerts(&alice).unwrap().alerts,
            vec!["High spending detected in Utilities: $600".to_string()]
        );
        assert_eq!(service().spending_alerts(&bob).unwrap().alerts.len(), 1);
        assert!(service().goal_reminders(&alice, None).unwrap().reminders.is_empty());
    }
}
