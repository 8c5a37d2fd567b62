use serde::Serialize;

use crate::transactions::Transaction;

/// A dated reminder line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    /// Human-readable day, e.g. `Mon Oct 19 2026`.
    pub date: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reminders {
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpendingAlerts {
    pub alerts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringNotifications {
    pub upcoming: Vec<Transaction>,
    pub missed: Vec<Transaction>,
    pub message: String,
}
