//! Shared fixtures for repository tests.

use std::sync::Arc;

use chrono::Utc;
use fintrack_core::users::{User, UserRepositoryTrait, UserRole};
use tempfile::TempDir;

use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::users::UserRepository;

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _dir: TempDir,
}

/// Migrated database in a temp dir with one user, `u1`.
pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    let db = TestDb {
        pool,
        writer,
        _dir: dir,
    };
    insert_user(&db, "u1").await;
    db
}

pub async fn insert_user(db: &TestDb, id: &str) {
    let now = Utc::now().naive_utc();
    UserRepository::new(Arc::clone(&db.pool), db.writer.clone())
        .insert_user(User {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            role: UserRole::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("Failed to insert user");
}
