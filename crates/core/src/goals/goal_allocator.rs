//! Splits lifetime income across auto-allocate goals.

use crate::constants::DEFAULT_ALLOCATION_PERCENTAGE;
use crate::goals::goals_model::{progress_for, AllocationResult, Goal};

/// One goal's share of an allocation run, before it is written back.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAllocation {
    pub goal_id: String,
    pub goal_title: String,
    pub amount: f64,
    pub new_saved_amount: f64,
    pub new_progress: i64,
}

impl From<&PlannedAllocation> for AllocationResult {
    fn from(planned: &PlannedAllocation) -> Self {
        AllocationResult {
            goal_id: planned.goal_id.clone(),
            goal_title: planned.goal_title.clone(),
            amount: planned.amount,
            new_progress: planned.new_progress,
        }
    }
}

/// Plans allocations for every auto-allocate goal, highest priority first.
///
/// Each goal receives `total_income * allocation_percentage / 100`, capped at
/// what it still needs. Goals that need nothing are left out, so saved
/// amounts never shrink and never pass the target.
pub fn allocate(goals: &[Goal], total_income: f64) -> Vec<PlannedAllocation> {
    let mut eligible: Vec<&Goal> = goals.iter().filter(|g| g.auto_allocate).collect();
    eligible.sort_by_key(|g| g.priority);

    eligible
        .into_iter()
        .filter_map(|goal| {
            let percentage = if goal.allocation_percentage != 0.0 {
                goal.allocation_percentage
            } else {
                DEFAULT_ALLOCATION_PERCENTAGE
            };
            let amount = (total_income * percentage / 100.0).min(goal.remaining_amount());
            if amount <= 0.0 {
                return None;
            }
            let new_saved_amount = goal.saved_amount + amount;
            Some(PlannedAllocation {
                goal_id: goal.id.clone(),
                goal_title: goal.title.clone(),
                amount,
                new_saved_amount,
                new_progress: progress_for(new_saved_amount, goal.target_amount),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalCategory;
    use chrono::NaiveDate;

    fn goal(id: &str, priority: i32, saved: f64, target: f64, pct: f64) -> Goal {
        let at = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Goal {
            id: id.into(),
            user_id: "u1".into(),
            title: format!("Goal {id}"),
            target_amount: target,
            saved_amount: saved,
            deadline: at,
            auto_allocate: true,
            allocation_percentage: pct,
            category: GoalCategory::Other,
            priority,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn ten_percent_of_income_is_allocated() {
        let planned = allocate(&[goal("g1", 1, 0.0, 10_000.0, 10.0)], 2000.0);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].amount, 200.0);
        assert_eq!(planned[0].new_saved_amount, 200.0);
        assert_eq!(planned[0].new_progress, 2);
    }

    #[test]
    fn allocation_is_capped_at_remaining_need() {
        let planned = allocate(&[goal("g1", 1, 950.0, 1000.0, 50.0)], 2000.0);
        assert_eq!(planned[0].amount, 50.0);
        assert_eq!(planned[0].new_saved_amount, 1000.0);
        assert_eq!(planned[0].new_progress, 100);
    }

    #[test]
    fn full_or_overfunded_goals_are_skipped() {
        let goals = [
            goal("full", 1, 1000.0, 1000.0, 10.0),
            goal("over", 2, 1200.0, 1000.0, 10.0),
        ];
        assert!(allocate(&goals, 5000.0).is_empty());
    }

    #[test]
    fn goals_are_processed_by_priority_and_manual_goals_ignored() {
        let mut manual = goal("manual", 0, 0.0, 1000.0, 10.0);
        manual.auto_allocate = false;
        let goals = [
            goal("low", 3, 0.0, 1000.0, 10.0),
            manual,
            goal("high", 1, 0.0, 1000.0, 10.0),
        ];
        let ids: Vec<_> = allocate(&goals, 1000.0)
            .into_iter()
            .map(|p| p.goal_id)
            .collect();
        assert_eq!(ids, vec!["high", "low"]);
    }

    #[test]
    fn zero_percentage_falls_back_to_default() {
        let planned = allocate(&[goal("g1", 1, 0.0, 10_000.0, 0.0)], 1000.0);
        assert_eq!(planned[0].amount, 100.0);
    }

    #[test]
    fn negative_percentage_allocates_nothing() {
        let goals = [
            goal("neg", 1, 0.0, 10_000.0, -5.0),
            goal("pos", 2, 0.0, 10_000.0, 10.0),
        ];
        let planned = allocate(&goals, 1000.0);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].goal_id, "pos");
    }
}
