/// Alert threshold, in percent of the budget, applied when none is given
pub const DEFAULT_ALERT_THRESHOLD: f64 = 80.0;

/// Calendar months averaged by budget recommendations
pub const RECOMMENDATION_WINDOW_MONTHS: u32 = 3;

/// Share of income, in percent, moved into an auto-allocate goal
pub const DEFAULT_ALLOCATION_PERCENTAGE: f64 = 10.0;

/// Goal priority when none is given (1 = highest)
pub const DEFAULT_GOAL_PRIORITY: i32 = 1;

/// Number of deadlines listed in goal statistics
pub const UPCOMING_DEADLINE_LIMIT: usize = 5;

/// Lifetime expense total per category above which an alert is raised
pub const SPENDING_ALERT_THRESHOLD: f64 = 500.0;

/// Reminder horizons, in days
pub const DEFAULT_BILL_REMINDER_DAYS: i64 = 7;
pub const DEFAULT_GOAL_REMINDER_DAYS: i64 = 30;
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;
