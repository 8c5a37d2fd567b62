use crate::errors::Result;
use crate::goals::goal_statistics::GoalStatistics;
use crate::goals::goals_model::{AllocationSummary, Goal, GoalUpdate, GoalView, NewGoal};
use crate::users::UserContext;
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>>;
    /// One user's goals ordered by priority, then deadline.
    fn find_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn count_goals(&self) -> Result<i64>;
    async fn insert_goal(&self, goal: Goal) -> Result<Goal>;
    async fn update_goal(&self, goal: Goal) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: String) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, ctx: &UserContext, new_goal: NewGoal) -> Result<GoalView>;
    fn get_goals(&self, ctx: &UserContext) -> Result<Vec<GoalView>>;
    async fn update_goal(
        &self,
        ctx: &UserContext,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<GoalView>;
    async fn delete_goal(&self, ctx: &UserContext, goal_id: &str) -> Result<()>;
    /// Moves a share of lifetime income into every auto-allocate goal.
    ///
    /// Each goal is written separately; a failure part-way leaves earlier
    /// goals updated.
    async fn auto_allocate_savings(&self, ctx: &UserContext) -> Result<AllocationSummary>;
    fn get_goal_statistics(&self, ctx: &UserContext) -> Result<GoalStatistics>;
}
