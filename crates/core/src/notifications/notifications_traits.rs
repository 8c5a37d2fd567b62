use crate::errors::Result;
use crate::notifications::notifications_model::{Reminders, SpendingAlerts};
use crate::users::UserContext;

/// Trait for notification service operations
pub trait NotificationServiceTrait: Send + Sync {
    fn spending_alerts(&self, ctx: &UserContext) -> Result<SpendingAlerts>;
    fn bill_reminders(&self, ctx: &UserContext, days_ahead: Option<i64>) -> Result<Reminders>;
    fn goal_reminders(&self, ctx: &UserContext, threshold: Option<i64>) -> Result<Reminders>;
}
