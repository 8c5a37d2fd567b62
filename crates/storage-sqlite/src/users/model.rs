//! Database models for users.

use diesel::prelude::*;
use fintrack_core::errors::Error;
use fintrack_core::users::{User, UserRole};

use crate::utils::parse_stored;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl TryFrom<UserDB> for User {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: parse_stored::<UserRole>("users.role", &db.role)?,
            id: db.id,
            name: db.name,
            email: db.email,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<User> for UserDB {
    fn from(domain: User) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            email: domain.email,
            role: domain.role.as_str().to_string(),
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
