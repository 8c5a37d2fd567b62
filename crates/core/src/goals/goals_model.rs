//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::time_utils::days_until;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GoalCategory {
    Car,
    Home,
    Education,
    Vacation,
    Emergency,
    Retirement,
    Other,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Car => "Car",
            GoalCategory::Home => "Home",
            GoalCategory::Education => "Education",
            GoalCategory::Vacation => "Vacation",
            GoalCategory::Emergency => "Emergency",
            GoalCategory::Retirement => "Retirement",
            GoalCategory::Other => "Other",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Car" => Ok(GoalCategory::Car),
            "Home" => Ok(GoalCategory::Home),
            "Education" => Ok(GoalCategory::Education),
            "Vacation" => Ok(GoalCategory::Vacation),
            "Emergency" => Ok(GoalCategory::Emergency),
            "Retirement" => Ok(GoalCategory::Retirement),
            "Other" => Ok(GoalCategory::Other),
            other => Err(Error::invalid_input(format!(
                "Unknown goal category '{other}'"
            ))),
        }
    }
}

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub deadline: NaiveDateTime,
    pub auto_allocate: bool,
    pub allocation_percentage: f64,
    pub category: GoalCategory,
    /// 1 is the highest priority.
    pub priority: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Saved over target as a whole percentage, capped at 100.
    pub fn capped_progress(&self) -> i64 {
        progress_for(self.saved_amount, self.target_amount)
    }

    /// Uncapped saved-to-target percentage used in reminder text.
    pub fn raw_progress_percent(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.saved_amount / self.target_amount * 100.0
        } else {
            0.0
        }
    }

    pub fn days_remaining(&self, now: NaiveDateTime) -> i64 {
        days_until(self.deadline, now)
    }

    pub fn remaining_amount(&self) -> f64 {
        self.target_amount - self.saved_amount
    }
}

/// Capped progress for an arbitrary saved amount against a target.
pub(crate) fn progress_for(saved: f64, target: f64) -> i64 {
    if target <= 0.0 {
        return 0;
    }
    ((saved / target * 100.0).round() as i64).min(100)
}

/// Goal as returned to clients, with the derived fields attached.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: i64,
    pub days_remaining: i64,
}

impl GoalView {
    pub fn new(goal: Goal, now: NaiveDateTime) -> Self {
        Self {
            progress: goal.capped_progress(),
            days_remaining: goal.days_remaining(now),
            goal,
        }
    }
}

/// Input model for creating a new goal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    #[serde(default, deserialize_with = "crate::utils::date_serde::deserialize_optional")]
    pub deadline: Option<NaiveDateTime>,
    pub auto_allocate: Option<bool>,
    pub allocation_percentage: Option<f64>,
    pub category: Option<GoalCategory>,
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub saved_amount: Option<f64>,
    #[serde(default, deserialize_with = "crate::utils::date_serde::deserialize_optional")]
    pub deadline: Option<NaiveDateTime>,
    pub auto_allocate: Option<bool>,
    pub allocation_percentage: Option<f64>,
    pub category: Option<GoalCategory>,
    pub priority: Option<i32>,
}

impl GoalUpdate {
    pub fn apply_to(self, goal: &mut Goal) {
        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(target) = self.target_amount {
            goal.target_amount = target;
        }
        if let Some(saved) = self.saved_amount {
            goal.saved_amount = saved;
        }
        if let Some(deadline) = self.deadline {
            goal.deadline = deadline;
        }
        if let Some(auto_allocate) = self.auto_allocate {
            goal.auto_allocate = auto_allocate;
        }
        if let Some(pct) = self.allocation_percentage {
            goal.allocation_percentage = pct;
        }
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub goal_id: String,
    pub goal_title: String,
    pub amount: f64,
    pub new_progress: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub message: String,
    pub total_allocated: f64,
    pub allocations: Vec<AllocationResult>,
}
