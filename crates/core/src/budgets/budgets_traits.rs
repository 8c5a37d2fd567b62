use crate::budgets::budgets_model::{
    Budget, BudgetRecommendation, BudgetStatus, BudgetUpdate, NewBudget,
};
use crate::errors::Result;
use crate::users::UserContext;
use async_trait::async_trait;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, budget_id: &str) -> Result<Option<Budget>>;
    /// One user's budgets in insertion order.
    fn find_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn count_budgets(&self) -> Result<i64>;
    async fn insert_budget(&self, budget: Budget) -> Result<Budget>;
    async fn update_budget(&self, budget: Budget) -> Result<Budget>;
    async fn set_recommendation(&self, budget_id: String, recommendation: String) -> Result<()>;
    async fn delete_budget(&self, budget_id: String) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn create_budget(&self, ctx: &UserContext, new_budget: NewBudget) -> Result<Budget>;
    fn get_budgets(&self, ctx: &UserContext) -> Result<Vec<Budget>>;
    async fn update_budget(
        &self,
        ctx: &UserContext,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;
    async fn delete_budget(&self, ctx: &UserContext, budget_id: &str) -> Result<()>;
    fn check_budget_status(&self, ctx: &UserContext) -> Result<BudgetStatus>;
    /// Computes recommendations and stores each one on its budget.
    async fn get_budget_recommendations(
        &self,
        ctx: &UserContext,
    ) -> Result<Vec<BudgetRecommendation>>;
}
