use crate::errors::Result;
use crate::notifications::RecurringNotifications;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionSort, TransactionUpdate,
};
use crate::users::UserContext;
use async_trait::async_trait;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>>;
    /// Loads one user's transactions matching `filter`, in `sort` order or
    /// insertion order when no sort is given.
    fn find_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
        sort: Option<TransactionSort>,
    ) -> Result<Vec<Transaction>>;
    fn count_transactions(&self) -> Result<i64>;
    async fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction>;
    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: String) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        ctx: &UserContext,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    fn get_transactions(
        &self,
        ctx: &UserContext,
        filter: &TransactionFilter,
        sort: Option<TransactionSort>,
    ) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, ctx: &UserContext, transaction_id: &str) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        ctx: &UserContext,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, ctx: &UserContext, transaction_id: &str) -> Result<()>;
    /// Recurring transactions whose recurrence has not lapsed.
    fn get_recurring_transactions(&self, ctx: &UserContext) -> Result<Vec<Transaction>>;
    fn get_recurring_notifications(
        &self,
        ctx: &UserContext,
        upcoming_days: Option<i64>,
    ) -> Result<RecurringNotifications>;
}
