//! Database models for goals.

use diesel::prelude::*;
use fintrack_core::errors::Error;
use fintrack_core::goals::{Goal, GoalCategory};

use crate::utils::parse_stored;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub deadline: chrono::NaiveDateTime,
    pub auto_allocate: bool,
    pub allocation_percentage: f64,
    pub category: String,
    pub priority: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl TryFrom<GoalDB> for Goal {
    type Error = Error;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_stored::<GoalCategory>("goals.category", &db.category)?,
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            target_amount: db.target_amount,
            saved_amount: db.saved_amount,
            deadline: db.deadline,
            auto_allocate: db.auto_allocate,
            allocation_percentage: db.allocation_percentage,
            priority: db.priority,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            category: domain.category.as_str().to_string(),
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            target_amount: domain.target_amount,
            saved_amount: domain.saved_amount,
            deadline: domain.deadline,
            auto_allocate: domain.auto_allocate,
            allocation_percentage: domain.allocation_percentage,
            priority: domain.priority,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
