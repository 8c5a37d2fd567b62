//! Budgets module - domain models, the budget evaluator, services, and traits.

pub mod budget_evaluator;
mod budgets_model;
mod budgets_service;
mod budgets_traits;

pub use budget_evaluator::{check_status, recommend};
pub use budgets_model::{
    Budget, BudgetPeriod, BudgetRecommendation, BudgetStatus, BudgetUpdate, NewBudget,
};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};

#[cfg(test)]
pub(crate) use budgets_service::tests::MockBudgetRepository;
