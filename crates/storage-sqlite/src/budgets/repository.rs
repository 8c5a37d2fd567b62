use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use fintrack_core::budgets::{Budget, BudgetRepositoryTrait};
use fintrack_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, budget_id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .find(budget_id)
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Budget::try_from)
            .transpose()
    }

    fn find_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::user_id.eq(user_id))
            .order((budgets::created_at.asc(), budgets::id.asc()))
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Budget::try_from)
            .collect()
    }

    fn count_budgets(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table.count().get_result(&mut conn).into_core()
    }

    async fn insert_budget(&self, budget: Budget) -> Result<Budget> {
        let row = BudgetDB::from(budget);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let inserted = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Budget::try_from(inserted)
            })
            .await
    }

    async fn update_budget(&self, budget: Budget) -> Result<Budget> {
        let row = BudgetDB::from(budget);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let updated = diesel::update(budgets::table.find(row.id.clone()))
                    .set(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Budget::try_from(updated)
            })
            .await
    }

    async fn set_recommendation(&self, budget_id: String, recommendation: String) -> Result<()> {
        let now = Utc::now().naive_utc();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(budgets::table.find(budget_id))
                    .set((
                        budgets::recommendations.eq(recommendation),
                        budgets::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn delete_budget(&self, budget_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(budgets::table.find(budget_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
