use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use fintrack_core::goals::{Goal, GoalRepositoryTrait};
use fintrack_core::Result;

use super::model::GoalDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::goals;

pub struct GoalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .find(goal_id)
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Goal::try_from)
            .transpose()
    }

    /// Priority first (1 is highest), then the nearest deadline.
    fn find_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .filter(goals::user_id.eq(user_id))
            .order((goals::priority.asc(), goals::deadline.asc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Goal::try_from)
            .collect()
    }

    fn count_goals(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        goals::table.count().get_result(&mut conn).into_core()
    }

    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        let row = GoalDB::from(goal);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let inserted = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Goal::try_from(inserted)
            })
            .await
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        let row = GoalDB::from(goal);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let updated = diesel::update(goals::table.find(row.id.clone()))
                    .set(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Goal::try_from(updated)
            })
            .await
    }

    async fn delete_goal(&self, goal_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(goals::table.find(goal_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use chrono::{NaiveDate, Utc};
    use fintrack_core::goals::GoalCategory;

    fn goal(id: &str, priority: i32, deadline_month: u32) -> Goal {
        let now = Utc::now().naive_utc();
        Goal {
            id: id.into(),
            user_id: "u1".into(),
            title: format!("Goal {id}"),
            target_amount: 1000.0,
            saved_amount: 0.0,
            deadline: NaiveDate::from_ymd_opt(2027, deadline_month, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            auto_allocate: true,
            allocation_percentage: 10.0,
            category: GoalCategory::Vacation,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn goals_come_back_by_priority_then_deadline() {
        let db = test_db().await;
        let repo = GoalRepository::new(Arc::clone(&db.pool), db.writer.clone());
        repo.insert_goal(goal("late", 1, 9)).await.unwrap();
        repo.insert_goal(goal("low", 2, 1)).await.unwrap();
        repo.insert_goal(goal("soon", 1, 3)).await.unwrap();

        let ids: Vec<_> = repo
            .find_goals("u1")
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["soon", "late", "low"]);
    }

    #[tokio::test]
    async fn update_keeps_category_and_saved_amount() {
        let db = test_db().await;
        let repo = GoalRepository::new(Arc::clone(&db.pool), db.writer.clone());
        let mut stored = repo.insert_goal(goal("g1", 1, 6)).await.unwrap();
        stored.saved_amount = 250.0;
        stored.category = GoalCategory::Emergency;
        repo.update_goal(stored).await.unwrap();

        let loaded = repo.get_goal("g1").unwrap().unwrap();
        assert_eq!(loaded.saved_amount, 250.0);
        assert_eq!(loaded.category, GoalCategory::Emergency);
        assert_eq!(repo.count_goals().unwrap(), 1);
        assert_eq!(repo.delete_goal("g1".into()).await.unwrap(), 1);
        assert_eq!(repo.count_goals().unwrap(), 0);
    }
}
