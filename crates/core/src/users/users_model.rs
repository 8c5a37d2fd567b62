//! User domain models and the per-request identity context.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(Error::invalid_input(format!("Unknown role '{other}'"))),
        }
    }
}

/// Domain model representing an account holder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for provisioning a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Admin-side changes to a user; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Authenticated caller, threaded explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
    pub role: UserRole,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Forbidden("Admin access required".to_string()))
        }
    }

    /// Rejects access to a record owned by someone else.
    pub fn ensure_owner(&self, owner_id: &str) -> Result<()> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            Err(Error::Unauthorized("Not authorized".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_is_checked_against_caller_id() {
        let ctx = UserContext::new("u-1", UserRole::User);
        assert!(ctx.ensure_owner("u-1").is_ok());
        assert!(matches!(
            ctx.ensure_owner("u-2"),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn only_admins_pass_the_role_check() {
        assert!(UserContext::new("a", UserRole::Admin).require_admin().is_ok());
        assert!(matches!(
            UserContext::new("u", UserRole::User).require_admin(),
            Err(Error::Forbidden(_))
        ));
    }

    #[test]
    fn roles_parse_from_lowercase_names() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("root".parse::<UserRole>().is_err());
    }
}
