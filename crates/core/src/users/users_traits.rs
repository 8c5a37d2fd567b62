use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserContext, UserUpdate};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn list_users(&self) -> Result<Vec<User>>;
    fn count_users(&self) -> Result<i64>;
    async fn insert_user(&self, user: User) -> Result<User>;
    async fn update_user(&self, user: User) -> Result<User>;
    async fn delete_user(&self, user_id: String) -> Result<usize>;
}

/// Trait for user administration and identity resolution
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Resolves the identity behind a validated token.
    fn resolve_identity(&self, user_id: &str) -> Result<UserContext>;
    fn get_users(&self, ctx: &UserContext) -> Result<Vec<User>>;
    async fn create_user(&self, ctx: &UserContext, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, ctx: &UserContext, user_id: &str, update: UserUpdate)
        -> Result<User>;
    async fn delete_user(&self, ctx: &UserContext, user_id: &str) -> Result<()>;
    /// Provisions an admin account at start-up unless the email is taken.
    async fn ensure_admin(&self, name: &str, email: &str) -> Result<User>;
}
