use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use fintrack_core::users::{User, UserRepositoryTrait};
use fintrack_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .order(users::created_at.asc())
            .select(UserDB::as_select())
            .load::<UserDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    fn count_users(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        users::table.count().get_result(&mut conn).into_core()
    }

    async fn insert_user(&self, user: User) -> Result<User> {
        let user_db = UserDB::from(user);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let inserted = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                User::try_from(inserted)
            })
            .await
    }

    async fn update_user(&self, user: User) -> Result<User> {
        let user_db = UserDB::from(user);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let updated = diesel::update(users::table.find(user_db.id.clone()))
                    .set(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                User::try_from(updated)
            })
            .await
    }

    /// Owned transactions, budgets, goals and currency preferences go with
    /// the user through `ON DELETE CASCADE`.
    async fn delete_user(&self, user_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::Utc;
    use fintrack_core::users::UserRole;
    use tempfile::tempdir;

    async fn create_test_repository() -> (UserRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (UserRepository::new(pool, writer), temp_dir)
    }

    fn user(id: &str, email: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: id.to_string(),
            name: "Sam".to_string(),
            email: email.to_string(),
            role: UserRole::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_lookup_and_update() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_user(user("u1", "sam@example.com")).await.unwrap();

        let by_email = repo.get_user_by_email("sam@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, "u1");

        let mut promoted = by_email.clone();
        promoted.role = UserRole::Admin;
        promoted.is_active = false;
        let updated = repo.update_user(promoted).await.unwrap();
        assert_eq!(updated.role, UserRole::Admin);
        assert!(!repo.get_user("u1").unwrap().unwrap().is_active);
        assert_eq!(repo.count_users().unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_user(user("u1", "dup@example.com")).await.unwrap();
        let err = repo
            .insert_user(user("u2", "dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            fintrack_core::Error::Database(fintrack_core::errors::DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_user(user("u1", "gone@example.com")).await.unwrap();
        assert_eq!(repo.delete_user("u1".to_string()).await.unwrap(), 1);
        assert_eq!(repo.delete_user("u1".to_string()).await.unwrap(), 0);
        assert!(repo.get_user("u1").unwrap().is_none());
        assert!(repo.list_users().unwrap().is_empty());
    }
}
