//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::invalid_input(format!(
                "Unknown transaction type '{other}'"
            ))),
        }
    }
}

/// Stored alongside recurring transactions. Occurrences are never generated
/// from it; only `date` and `recurrence_end_date` drive reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
}

impl RecurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Monthly => "monthly",
        }
    }
}

impl FromStr for RecurrencePattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(RecurrencePattern::Daily),
            "weekly" => Ok(RecurrencePattern::Weekly),
            "monthly" => Ok(RecurrencePattern::Monthly),
            other => Err(Error::invalid_input(format!(
                "Unknown recurrence pattern '{other}'"
            ))),
        }
    }
}

/// Domain model representing a single income or expense record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub tags: Vec<String>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub recurrence_end_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// A recurrence with no end date never lapses.
    pub fn recurrence_active_at(&self, at: NaiveDateTime) -> bool {
        self.is_recurring && self.recurrence_end_date.map_or(true, |end| end >= at)
    }
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::date_serde::deserialize_optional")]
    pub date: Option<NaiveDateTime>,
    pub tags: Option<Vec<String>>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[serde(default, deserialize_with = "crate::utils::date_serde::deserialize_optional")]
    pub recurrence_end_date: Option<NaiveDateTime>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::date_serde::deserialize_optional")]
    pub date: Option<NaiveDateTime>,
    pub tags: Option<Vec<String>>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[serde(default, deserialize_with = "crate::utils::date_serde::deserialize_optional")]
    pub recurrence_end_date: Option<NaiveDateTime>,
}

impl TransactionUpdate {
    pub fn apply_to(self, tx: &mut Transaction) {
        if let Some(transaction_type) = self.transaction_type {
            tx.transaction_type = transaction_type;
        }
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(category) = self.category {
            tx.category = category;
        }
        if let Some(description) = self.description {
            tx.description = Some(description);
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(tags) = self.tags {
            tx.tags = tags;
        }
        if let Some(is_recurring) = self.is_recurring {
            tx.is_recurring = is_recurring;
        }
        if let Some(pattern) = self.recurrence_pattern {
            tx.recurrence_pattern = Some(pattern);
        }
        if let Some(end) = self.recurrence_end_date {
            tx.recurrence_end_date = Some(end);
        }
    }
}

/// Record-store filter over one user's transactions.
///
/// Date bounds and amount bounds are inclusive. `tags` matches when the
/// transaction carries any of the listed tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub recurring_only: bool,
}

impl TransactionFilter {
    pub fn of_type(transaction_type: TransactionType) -> Self {
        Self {
            transaction_type: Some(transaction_type),
            ..Self::default()
        }
    }

    pub fn recurring() -> Self {
        Self {
            recurring_only: true,
            ..Self::default()
        }
    }

    /// Splits a comma-separated tag list, dropping empty entries.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(kind) = self.transaction_type {
            if tx.transaction_type != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &tx.category != category {
                return false;
            }
        }
        if !self.tags.is_empty() && !tx.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if self.start_date.is_some_and(|start| tx.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| tx.date > end) {
            return false;
        }
        if self.min_amount.is_some_and(|min| tx.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| tx.amount > max) {
            return false;
        }
        !self.recurring_only || tx.is_recurring
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionSortField {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "amount")]
    Amount,
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSort {
    pub field: TransactionSortField,
    pub order: SortOrder,
}

impl TransactionSort {
    pub fn date_ascending() -> Self {
        Self {
            field: TransactionSortField::Date,
            order: SortOrder::Asc,
        }
    }

    pub fn date_descending() -> Self {
        Self {
            field: TransactionSortField::Date,
            order: SortOrder::Desc,
        }
    }
}
