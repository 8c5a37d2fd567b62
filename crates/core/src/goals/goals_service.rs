use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::constants::{DEFAULT_ALLOCATION_PERCENTAGE, DEFAULT_GOAL_PRIORITY};
use crate::errors::{Error, Result};
use crate::goals::goal_allocator;
use crate::goals::goal_statistics::{self, GoalStatistics};
use crate::goals::goals_model::{
    AllocationResult, AllocationSummary, Goal, GoalUpdate, GoalView, NewGoal,
};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait, TransactionType};
use crate::users::UserContext;

pub const ALLOCATION_MESSAGE: &str = "Savings automatically allocated to goals.";

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        GoalService {
            goal_repo,
            transaction_repo,
        }
    }

    fn load_owned(&self, ctx: &UserContext, goal_id: &str) -> Result<Goal> {
        let goal = self
            .goal_repo
            .get_goal(goal_id)?
            .ok_or_else(|| Error::NotFound("Goal not found".to_string()))?;
        ctx.ensure_owner(&goal.user_id)?;
        Ok(goal)
    }

    fn lifetime_income(&self, user_id: &str) -> Result<f64> {
        let income = self.transaction_repo.find_transactions(
            user_id,
            &TransactionFilter::of_type(TransactionType::Income),
            None,
        )?;
        Ok(income.iter().map(|t| t.amount).sum())
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, ctx: &UserContext, new_goal: NewGoal) -> Result<GoalView> {
        let title = new_goal
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::missing_field("title"))?;
        let target_amount = new_goal
            .target_amount
            .filter(|t| *t != 0.0)
            .ok_or_else(|| Error::missing_field("targetAmount"))?;
        let deadline = new_goal
            .deadline
            .ok_or_else(|| Error::missing_field("deadline"))?;
        let category = new_goal
            .category
            .ok_or_else(|| Error::missing_field("category"))?;

        let now = Utc::now().naive_utc();
        let goal = self
            .goal_repo
            .insert_goal(Goal {
                id: Uuid::new_v4().to_string(),
                user_id: ctx.user_id.clone(),
                title,
                target_amount,
                saved_amount: 0.0,
                deadline,
                auto_allocate: new_goal.auto_allocate.unwrap_or(false),
                allocation_percentage: new_goal
                    .allocation_percentage
                    .filter(|p| *p != 0.0)
                    .unwrap_or(DEFAULT_ALLOCATION_PERCENTAGE),
                category,
                priority: new_goal
                    .priority
                    .filter(|p| *p != 0)
                    .unwrap_or(DEFAULT_GOAL_PRIORITY),
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!("Goal {} created for user {}", goal.id, ctx.user_id);
        Ok(GoalView::new(goal, now))
    }

    fn get_goals(&self, ctx: &UserContext) -> Result<Vec<GoalView>> {
        let now = Utc::now().naive_utc();
        Ok(self
            .goal_repo
            .find_goals(&ctx.user_id)?
            .into_iter()
            .map(|g| GoalView::new(g, now))
            .collect())
    }

    async fn update_goal(
        &self,
        ctx: &UserContext,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<GoalView> {
        let mut goal = self.load_owned(ctx, goal_id)?;
        update.apply_to(&mut goal);
        let now = Utc::now().naive_utc();
        goal.updated_at = now;
        let updated = self.goal_repo.update_goal(goal).await?;
        Ok(GoalView::new(updated, now))
    }

    async fn delete_goal(&self, ctx: &UserContext, goal_id: &str) -> Result<()> {
        self.load_owned(ctx, goal_id)?;
        self.goal_repo.delete_goal(goal_id.to_string()).await?;
        info!("Goal {} removed by user {}", goal_id, ctx.user_id);
        Ok(())
    }

    async fn auto_allocate_savings(&self, ctx: &UserContext) -> Result<AllocationSummary> {
        let goals: Vec<Goal> = self
            .goal_repo
            .find_goals(&ctx.user_id)?
            .into_iter()
            .filter(|g| g.auto_allocate)
            .collect();
        if goals.is_empty() {
            return Err(Error::NotFound(
                "No goals with auto-allocation enabled".to_string(),
            ));
        }

        let total_income = self.lifetime_income(&ctx.user_id)?;
        let planned = goal_allocator::allocate(&goals, total_income);
        debug!(
            "Allocating from income {} across {} of {} goals for user {}",
            total_income,
            planned.len(),
            goals.len(),
            ctx.user_id
        );

        let now = Utc::now().naive_utc();
        for plan in &planned {
            if let Some(goal) = goals.iter().find(|g| g.id == plan.goal_id) {
                let mut goal = goal.clone();
                goal.saved_amount = plan.new_saved_amount;
                goal.updated_at = now;
                self.goal_repo.update_goal(goal).await?;
            }
        }

        let allocations: Vec<AllocationResult> = planned.iter().map(Into::into).collect();
        let total_allocated = allocations.iter().map(|a| a.amount).sum();
        info!(
            "Allocated {} to {} goals for user {}",
            total_allocated,
            allocations.len(),
            ctx.user_id
        );
        Ok(AllocationSummary {
            message: ALLOCATION_MESSAGE.to_string(),
            total_allocated,
            allocations,
        })
    }

    fn get_goal_statistics(&self, ctx: &UserContext) -> Result<GoalStatistics> {
        let goals = self.goal_repo.find_goals(&ctx.user_id)?;
        Ok(goal_statistics::goal_statistics(
            &goals,
            Utc::now().naive_utc(),
        ))
    }
}
