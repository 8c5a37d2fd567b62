//! Database models for budgets.

use diesel::prelude::*;
use fintrack_core::budgets::{Budget, BudgetPeriod};
use fintrack_core::errors::Error;

use crate::utils::parse_stored;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    pub period: String,
    pub spent: f64,
    pub alert_threshold: f64,
    pub recommendations: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            period: parse_stored::<BudgetPeriod>("budgets.period", &db.period)?,
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            amount: db.amount,
            spent: db.spent,
            alert_threshold: db.alert_threshold,
            recommendations: db.recommendations,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Budget> for BudgetDB {
    fn from(domain: Budget) -> Self {
        Self {
            period: domain.period.as_str().to_string(),
            id: domain.id,
            user_id: domain.user_id,
            category: domain.category,
            amount: domain.amount,
            spent: domain.spent,
            alert_threshold: domain.alert_threshold,
            recommendations: domain.recommendations,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
