//! Aggregate view over a user's goals.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::constants::UPCOMING_DEADLINE_LIMIT;
use crate::goals::goals_model::{Goal, GoalCategory};

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub count: usize,
    pub saved: f64,
    pub target: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDeadline {
    pub id: String,
    pub title: String,
    pub days_remaining: i64,
    pub progress: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatistics {
    pub overall_progress: i64,
    pub total_saved: f64,
    pub total_target: f64,
    pub total_goals: usize,
    pub completed_goals: usize,
    pub category_distribution: BTreeMap<GoalCategory, CategoryStats>,
    pub upcoming_deadlines: Vec<UpcomingDeadline>,
}

pub fn goal_statistics(goals: &[Goal], now: NaiveDateTime) -> GoalStatistics {
    let total_saved: f64 = goals.iter().map(|g| g.saved_amount).sum();
    let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
    let overall_progress = if total_target > 0.0 {
        (total_saved / total_target * 100.0).round() as i64
    } else {
        0
    };

    let mut category_distribution: BTreeMap<GoalCategory, CategoryStats> = BTreeMap::new();
    for goal in goals {
        let entry = category_distribution.entry(goal.category).or_default();
        entry.count += 1;
        entry.saved += goal.saved_amount;
        entry.target += goal.target_amount;
    }

    let mut pending: Vec<&Goal> = goals
        .iter()
        .filter(|g| g.capped_progress() < 100 && g.days_remaining(now) > 0)
        .collect();
    pending.sort_by_key(|g| g.deadline);
    let upcoming_deadlines = pending
        .into_iter()
        .take(UPCOMING_DEADLINE_LIMIT)
        .map(|g| UpcomingDeadline {
            id: g.id.clone(),
            title: g.title.clone(),
            days_remaining: g.days_remaining(now),
            progress: g.capped_progress(),
        })
        .collect();

    GoalStatistics {
        overall_progress,
        total_saved,
        total_target,
        total_goals: goals.len(),
        completed_goals: goals.iter().filter(|g| g.capped_progress() >= 100).count(),
        category_distribution,
        upcoming_deadlines,
    }
}
