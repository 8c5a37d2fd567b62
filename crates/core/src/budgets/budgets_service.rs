use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::budgets::budget_evaluator;
use crate::budgets::budgets_model::{
    Budget, BudgetRecommendation, BudgetStatus, BudgetUpdate, NewBudget,
};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};
use crate::transactions::{
    Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionType,
};
use crate::users::UserContext;

pub struct BudgetService {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        BudgetService {
            budget_repo,
            transaction_repo,
        }
    }

    fn load_owned(&self, ctx: &UserContext, budget_id: &str) -> Result<Budget> {
        let budget = self
            .budget_repo
            .get_budget(budget_id)?
            .ok_or_else(|| Error::NotFound("Budget not found".to_string()))?;
        ctx.ensure_owner(&budget.user_id)?;
        Ok(budget)
    }

    fn load_inputs(&self, ctx: &UserContext) -> Result<(Vec<Budget>, Vec<Transaction>)> {
        let budgets = self.budget_repo.find_budgets(&ctx.user_id)?;
        let expenses = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &TransactionFilter::of_type(TransactionType::Expense),
            None,
        )?;
        Ok((budgets, expenses))
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budget(&self, ctx: &UserContext, new_budget: NewBudget) -> Result<Budget> {
        let alert_threshold = new_budget.alert_threshold_or_default();
        let category = new_budget
            .category
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::missing_field("category"))?;
        let amount = new_budget
            .amount
            .filter(|a| *a != 0.0)
            .ok_or_else(|| Error::missing_field("amount"))?;
        let period = new_budget
            .period
            .ok_or_else(|| Error::missing_field("period"))?;

        let now = Utc::now().naive_utc();
        let budget = self
            .budget_repo
            .insert_budget(Budget {
                id: Uuid::new_v4().to_string(),
                user_id: ctx.user_id.clone(),
                category,
                amount,
                period,
                spent: 0.0,
                alert_threshold,
                recommendations: String::new(),
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!("Budget {} created for user {}", budget.id, ctx.user_id);
        Ok(budget)
    }

    fn get_budgets(&self, ctx: &UserContext) -> Result<Vec<Budget>> {
        self.budget_repo.find_budgets(&ctx.user_id)
    }

    async fn update_budget(
        &self,
        ctx: &UserContext,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        let mut budget = self.load_owned(ctx, budget_id)?;
        update.apply_to(&mut budget);
        budget.updated_at = Utc::now().naive_utc();
        self.budget_repo.update_budget(budget).await
    }

    async fn delete_budget(&self, ctx: &UserContext, budget_id: &str) -> Result<()> {
        self.load_owned(ctx, budget_id)?;
        self.budget_repo.delete_budget(budget_id.to_string()).await?;
        info!("Budget {} removed by user {}", budget_id, ctx.user_id);
        Ok(())
    }

    fn check_budget_status(&self, ctx: &UserContext) -> Result<BudgetStatus> {
        let (budgets, expenses) = self.load_inputs(ctx)?;
        Ok(budget_evaluator::check_status(&budgets, &expenses))
    }

    async fn get_budget_recommendations(
        &self,
        ctx: &UserContext,
    ) -> Result<Vec<BudgetRecommendation>> {
        let (budgets, expenses) = self.load_inputs(ctx)?;
        let recommendations =
            budget_evaluator::recommend(&budgets, &expenses, Utc::now().naive_utc());
        for rec in &recommendations {
            self.budget_repo
                .set_recommendation(rec.budget_id.clone(), rec.recommendation.clone())
                .await?;
        }
        debug!(
            "Stored {} budget recommendations for user {}",
            recommendations.len(),
            ctx.user_id
        );
        Ok(recommendations)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::budgets::BudgetPeriod;
    use crate::transactions::MockTransactionRepository;
    use crate::users::UserRole;
    use chrono::Duration;
    use std::sync::RwLock;

    #[derive(Default)]
    pub(crate) struct MockBudgetRepository {
        pub(crate) budgets: RwLock<Vec<Budget>>,
    }

    #[async_trait]
    impl BudgetRepositoryTrait for MockBudgetRepository {
        fn get_budget(&self, budget_id: &str) -> Result<Option<Budget>> {
            Ok(self
                .budgets
                .read()
                .unwrap()
                .iter()
                .find(|b| b.id == budget_id)
                .cloned())
        }

        fn find_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
            Ok(self
                .budgets
                .read()
                .unwrap()
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect())
        }

        fn count_budgets(&self) -> Result<i64> {
            Ok(self.budgets.read().unwrap().len() as i64)
        }

        async fn insert_budget(&self, budget: Budget) -> Result<Budget> {
            self.budgets.write().unwrap().push(budget.clone());
            Ok(budget)
        }

        async fn update_budget(&self, budget: Budget) -> Result<Budget> {
            let mut all = self.budgets.write().unwrap();
            let slot = all.iter_mut().find(|b| b.id == budget.id).unwrap();
            *slot = budget.clone();
            Ok(budget)
        }

        async fn set_recommendation(&self, budget_id: String, recommendation: String) -> Result<()> {
            let mut all = self.budgets.write().unwrap();
            if let Some(b) = all.iter_mut().find(|b| b.id == budget_id) {
                b.recommendations = recommendation;
            }
            Ok(())
        }

        async fn delete_budget(&self, budget_id: String) -> Result<usize> {
            let mut all = self.budgets.write().unwrap();
            let before = all.len();
            all.retain(|b| b.id != budget_id);
            Ok(before - all.len())
        }
    }

    fn alice() -> UserContext {
        UserContext::new("alice", UserRole::User)
    }

    fn groceries(amount: f64) -> NewBudget {
        NewBudget {
            category: Some("Groceries".to_string()),
            amount: Some(amount),
            period: Some(BudgetPeriod::Monthly),
            alert_threshold: None,
        }
    }

    fn expense_days_ago(category: &str, amount: f64, days: i64) -> Transaction {
        let date = Utc::now().naive_utc() - Duration::days(days);
        Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: "alice".to_string(),
            transaction_type: TransactionType::Expense,
            amount,
            category: category.to_string(),
            description: None,
            date,
            tags: vec![],
            is_recurring: false,
            recurrence_pattern: None,
            recurrence_end_date: None,
            created_at: date,
            updated_at: date,
        }
    }

    #[tokio::test]
    async fn create_budget_applies_defaults() {
        let service = BudgetService::new(
            Arc::new(MockBudgetRepository::default()),
            Arc::new(MockTransactionRepository::default()),
        );
        let budget = service.create_budget(&alice(), groceries(300.0)).await.unwrap();
        assert_eq!(budget.alert_threshold, 80.0);
        assert_eq!(budget.spent, 0.0);
        assert!(budget.recommendations.is_empty());

        let mut missing = groceries(300.0);
        missing.period = None;
        assert!(matches!(
            service.create_budget(&alice(), missing).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn status_reads_only_the_callers_expenses() {
        let mut someone_else = expense_days_ago("Groceries", 1000.0, 1);
        someone_else.user_id = "bob".to_string();
        let service = BudgetService::new(
            Arc::new(MockBudgetRepository::default()),
            Arc::new(MockTransactionRepository::with(vec![someone_else])),
        );
        service.create_budget(&alice(), groceries(300.0)).await.unwrap();
        assert_eq!(
            service.check_budget_status(&alice()).unwrap().message,
            "All budgets are within limits."
        );
    }

    #[tokio::test]
    async fn recommendations_are_persisted_on_budgets() {
        let budgets = Arc::new(MockBudgetRepository::default());
        let service = BudgetService::new(
            budgets.clone(),
            Arc::new(MockTransactionRepository::with(vec![
                expense_days_ago("Groceries", 330.0, 10),
                expense_days_ago("Groceries", 330.0, 40),
            ])),
        );
        let budget = service.create_budget(&alice(), groceries(100.0)).await.unwrap();

        let recs = service.get_budget_recommendations(&alice()).await.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].percent_of_budget, 220);

        let stored = budgets.get_budget(&budget.id).unwrap().unwrap();
        assert_eq!(stored.recommendations, recs[0].recommendation);
    }

    #[tokio::test]
    async fn foreign_budget_cannot_be_deleted() {
        let budgets = Arc::new(MockBudgetRepository::default());
        let service = BudgetService::new(
            budgets.clone(),
            Arc::new(MockTransactionRepository::default()),
        );
        let budget = service.create_budget(&alice(), groceries(100.0)).await.unwrap();
        let bob = UserContext::new("bob", UserRole::User);
        assert!(matches!(
            service.delete_budget(&bob, &budget.id).await,
            Err(Error::Unauthorized(_))
        ));
        service.delete_budget(&alice(), &budget.id).await.unwrap();
        assert_eq!(budgets.count_budgets().unwrap(), 0);
    }
}
