//! Notifications module - spending alerts and reminders.

mod notifications_model;
mod notifications_service;
mod notifications_traits;
mod reminders;

pub use notifications_model::{RecurringNotifications, Reminder, Reminders, SpendingAlerts};
pub use notifications_service::NotificationService;
pub use notifications_traits::NotificationServiceTrait;
pub use reminders::{
    active_recurring, bill_reminders, goal_reminders, recurring_notifications, spending_alerts,
};
