//! Goals module - domain models, allocation, statistics, services, and traits.

pub mod goal_allocator;
pub mod goal_statistics;
mod goals_model;
mod goals_service;
mod goals_traits;

pub use goal_allocator::{allocate, PlannedAllocation};
pub use goal_statistics::{goal_statistics, CategoryStats, GoalStatistics, UpcomingDeadline};
pub use goals_model::{
    AllocationResult, AllocationSummary, Goal, GoalCategory, GoalUpdate, GoalView, NewGoal,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

#[cfg(test)]
pub(crate) use goals_service::tests::MockGoalRepository;
