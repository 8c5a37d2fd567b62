use std::sync::Arc;

use chrono::Utc;
use log::debug;

use crate::budgets::BudgetRepositoryTrait;
use crate::dashboard::dashboard_model::{AdminDashboard, UserDashboard};
use crate::dashboard::dashboard_traits::DashboardServiceTrait;
use crate::errors::Result;
use crate::goals::{GoalRepositoryTrait, GoalView};
use crate::reports::spending_aggregator;
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait};
use crate::users::{UserContext, UserRepositoryTrait};

pub struct DashboardService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        DashboardService {
            user_repo,
            transaction_repo,
            budget_repo,
            goal_repo,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_admin_dashboard(&self, ctx: &UserContext) -> Result<AdminDashboard> {
        ctx.require_admin()?;
        Ok(AdminDashboard {
            total_users: self.user_repo.count_users()?,
            total_transactions: self.transaction_repo.count_transactions()?,
            total_budgets: self.budget_repo.count_budgets()?,
            total_goals: self.goal_repo.count_goals()?,
        })
    }

    fn get_user_dashboard(&self, ctx: &UserContext) -> Result<UserDashboard> {
        debug!("Building dashboard for user {}", ctx.user_id);
        let transactions = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &TransactionFilter::default(),
            None,
        )?;
        let summary = spending_aggregator::aggregate(&transactions);
        let now = Utc::now().naive_utc();
        Ok(UserDashboard {
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            balance: summary.balance,
            budgets: self.budget_repo.find_budgets(&ctx.user_id)?,
            goals: self
                .goal_repo
                .find_goals(&ctx.user_id)?
                .into_iter()
                .map(|g| GoalView::new(g, now))
                .collect(),
        })
    }
}
