//! Database models for transactions.

use diesel::prelude::*;
use fintrack_core::errors::Error;
use fintrack_core::transactions::{RecurrencePattern, Transaction, TransactionType};

use crate::utils::{from_json_text, parse_stored, to_json_text};

/// Row shape of the `transactions` table. Tags live in a JSON text column.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: chrono::NaiveDateTime,
    pub tags: String,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    pub recurrence_end_date: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let recurrence_pattern = db
            .recurrence_pattern
            .as_deref()
            .map(|raw| parse_stored::<RecurrencePattern>("transactions.recurrence_pattern", raw))
            .transpose()?;
        Ok(Self {
            transaction_type: parse_stored::<TransactionType>(
                "transactions.transaction_type",
                &db.transaction_type,
            )?,
            tags: from_json_text(&db.tags)?,
            recurrence_pattern,
            id: db.id,
            user_id: db.user_id,
            amount: db.amount,
            category: db.category,
            description: db.description,
            date: db.date,
            is_recurring: db.is_recurring,
            recurrence_end_date: db.recurrence_end_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl TryFrom<Transaction> for TransactionDB {
    type Error = Error;

    fn try_from(domain: Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            tags: to_json_text(&domain.tags)?,
            transaction_type: domain.transaction_type.as_str().to_string(),
            recurrence_pattern: domain.recurrence_pattern.map(|p| p.as_str().to_string()),
            id: domain.id,
            user_id: domain.user_id,
            amount: domain.amount,
            category: domain.category,
            description: domain.description,
            date: domain.date,
            is_recurring: domain.is_recurring,
            recurrence_end_date: domain.recurrence_end_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        })
    }
}
