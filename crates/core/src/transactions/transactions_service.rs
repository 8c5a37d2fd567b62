use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::constants::DEFAULT_UPCOMING_DAYS;
use crate::errors::{Error, Result};
use crate::notifications::{self, RecurringNotifications};
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionSort, TransactionUpdate,
};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use crate::users::UserContext;

pub struct TransactionService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(transaction_repo: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { transaction_repo }
    }

    /// Loads a transaction and checks that the caller owns it.
    fn load_owned(&self, ctx: &UserContext, transaction_id: &str) -> Result<Transaction> {
        let tx = self
            .transaction_repo
            .get_transaction(transaction_id)?
            .ok_or_else(|| Error::NotFound("Transaction not found".to_string()))?;
        ctx.ensure_owner(&tx.user_id)?;
        Ok(tx)
    }

    fn validate_amount(amount: f64) -> Result<f64> {
        if amount.is_finite() && amount > 0.0 {
            Ok(amount)
        } else {
            Err(Error::invalid_input("Amount must be a positive number"))
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        ctx: &UserContext,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        let transaction_type = new_transaction
            .transaction_type
            .ok_or_else(|| Error::missing_field("type"))?;
        let amount = new_transaction
            .amount
            .ok_or_else(|| Error::missing_field("amount"))
            .and_then(Self::validate_amount)?;
        let category = new_transaction
            .category
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::missing_field("category"))?;

        let now = Utc::now().naive_utc();
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: ctx.user_id.clone(),
            transaction_type,
            amount,
            category,
            description: new_transaction.description,
            date: new_transaction.date.unwrap_or(now),
            tags: new_transaction.tags.unwrap_or_default(),
            is_recurring: new_transaction.is_recurring.unwrap_or(false),
            recurrence_pattern: new_transaction.recurrence_pattern,
            recurrence_end_date: new_transaction.recurrence_end_date,
            created_at: now,
            updated_at: now,
        };
        let created = self.transaction_repo.insert_transaction(tx).await?;
        info!(
            "New transaction created: {} by user {}",
            created.id, ctx.user_id
        );
        Ok(created)
    }

    fn get_transactions(
        &self,
        ctx: &UserContext,
        filter: &TransactionFilter,
        sort: Option<TransactionSort>,
    ) -> Result<Vec<Transaction>> {
        self.transaction_repo
            .find_transactions(&ctx.user_id, filter, sort)
    }

    fn get_transaction(&self, ctx: &UserContext, transaction_id: &str) -> Result<Transaction> {
        self.load_owned(ctx, transaction_id)
    }

    async fn update_transaction(
        &self,
        ctx: &UserContext,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut tx = self.load_owned(ctx, transaction_id)?;
        if let Some(amount) = update.amount {
            Self::validate_amount(amount)?;
        }
        update.apply_to(&mut tx);
        tx.updated_at = Utc::now().naive_utc();
        let updated = self.transaction_repo.update_transaction(tx).await?;
        info!("Transaction updated: {} by user {}", updated.id, ctx.user_id);
        Ok(updated)
    }

    async fn delete_transaction(&self, ctx: &UserContext, transaction_id: &str) -> Result<()> {
        self.load_owned(ctx, transaction_id)?;
        self.transaction_repo
            .delete_transaction(transaction_id.to_string())
            .await?;
        info!("Transaction deleted: {} by user {}", transaction_id, ctx.user_id);
        Ok(())
    }

    fn get_recurring_transactions(&self, ctx: &UserContext) -> Result<Vec<Transaction>> {
        let recurring = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &TransactionFilter::recurring(),
            Some(TransactionSort::date_ascending()),
        )?;
        Ok(notifications::active_recurring(
            &recurring,
            Utc::now().naive_utc(),
        ))
    }

    fn get_recurring_notifications(
        &self,
        ctx: &UserContext,
        upcoming_days: Option<i64>,
    ) -> Result<RecurringNotifications> {
        let recurring = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &TransactionFilter::recurring(),
            Some(TransactionSort::date_ascending()),
        )?;
        // Zero means "not given", like an absent parameter.
        let days = upcoming_days
            .filter(|d| *d != 0)
            .unwrap_or(DEFAULT_UPCOMING_DAYS);
        debug!(
            "Classifying {} recurring transactions for user {} ({} day horizon)",
            recurring.len(),
            ctx.user_id,
            days
        );
        Ok(notifications::recurring_notifications(
            &recurring,
            Utc::now().naive_utc(),
            days,
        ))
    }
}
