use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::users::users_model::{NewUser, User, UserContext, UserRole, UserUpdate};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { user_repo }
    }

    fn load_user(&self, user_id: &str) -> Result<User> {
        self.user_repo
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    async fn insert(&self, name: String, email: String, role: UserRole) -> Result<User> {
        if self.user_repo.get_user_by_email(&email)?.is_some() {
            return Err(Error::ConstraintViolation("User already exists".to_string()));
        }
        let now = Utc::now().naive_utc();
        self.user_repo
            .insert_user(User {
                id: Uuid::new_v4().to_string(),
                name,
                email,
                role,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn resolve_identity(&self, user_id: &str) -> Result<UserContext> {
        let user = self
            .user_repo
            .get_user(user_id)?
            .ok_or_else(|| Error::Unauthorized("Not authorized, user not found".to_string()))?;
        if !user.is_active {
            warn!("Rejected request from deactivated user {}", user.id);
            return Err(Error::Unauthorized(
                "Not authorized, account is deactivated".to_string(),
            ));
        }
        Ok(UserContext::new(user.id, user.role))
    }

    fn get_users(&self, ctx: &UserContext) -> Result<Vec<User>> {
        ctx.require_admin()?;
        self.user_repo.list_users()
    }

    async fn create_user(&self, ctx: &UserContext, new_user: NewUser) -> Result<User> {
        ctx.require_admin()?;
        let name = new_user
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| Error::missing_field("name"))?;
        let email = new_user
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::missing_field("email"))?;
        let user = self
            .insert(name, email, new_user.role.unwrap_or_default())
            .await?;
        info!("User {} provisioned by {}", user.id, ctx.user_id);
        Ok(user)
    }

    async fn update_user(
        &self,
        ctx: &UserContext,
        user_id: &str,
        update: UserUpdate,
    ) -> Result<User> {
        ctx.require_admin()?;
        let mut user = self.load_user(user_id)?;
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now().naive_utc();
        self.user_repo.update_user(user).await
    }

    async fn delete_user(&self, ctx: &UserContext, user_id: &str) -> Result<()> {
        ctx.require_admin()?;
        self.load_user(user_id)?;
        self.user_repo.delete_user(user_id.to_string()).await?;
        info!("User {} deleted by {}", user_id, ctx.user_id);
        Ok(())
    }

    async fn ensure_admin(&self, name: &str, email: &str) -> Result<User> {
        let email = email.trim().to_lowercase();
        if let Some(existing) = self.user_repo.get_user_by_email(&email)? {
            return Ok(existing);
        }
        let user = self
            .insert(name.to_string(), email, UserRole::Admin)
            .await?;
        info!("Bootstrap admin {} created", user.id);
        Ok(user)
    }
}
