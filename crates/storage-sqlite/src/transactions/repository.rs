use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use fintrack_core::transactions::{
    SortOrder, Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionSort,
    TransactionSortField,
};
use fintrack_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }
}

/// Pushes the column predicates of `filter` into SQL. Tag matching needs
/// the decoded JSON column and is applied after loading.
fn filtered_query<'a>(
    user_id: &'a str,
    filter: &'a TransactionFilter,
) -> transactions::BoxedQuery<'a, Sqlite> {
    let mut query = transactions::table
        .filter(transactions::user_id.eq(user_id))
        .into_boxed();

    if let Some(kind) = filter.transaction_type {
        query = query.filter(transactions::transaction_type.eq(kind.as_str()));
    }
    if let Some(category) = &filter.category {
        query = query.filter(transactions::category.eq(category.as_str()));
    }
    if let Some(start) = filter.start_date {
        query = query.filter(transactions::date.ge(start));
    }
    if let Some(end) = filter.end_date {
        query = query.filter(transactions::date.le(end));
    }
    if let Some(min) = filter.min_amount {
        query = query.filter(transactions::amount.ge(min));
    }
    if let Some(max) = filter.max_amount {
        query = query.filter(transactions::amount.le(max));
    }
    if filter.recurring_only {
        query = query.filter(transactions::is_recurring.eq(true));
    }
    query
}

fn sorted<'a>(
    query: transactions::BoxedQuery<'a, Sqlite>,
    sort: TransactionSort,
) -> transactions::BoxedQuery<'a, Sqlite> {
    use TransactionSortField::*;
    match (sort.field, sort.order) {
        (Date, SortOrder::Asc) => query.order(transactions::date.asc()),
        (Date, SortOrder::Desc) => query.order(transactions::date.desc()),
        (Amount, SortOrder::Asc) => query.order(transactions::amount.asc()),
        (Amount, SortOrder::Desc) => query.order(transactions::amount.desc()),
        (Category, SortOrder::Asc) => query.order(transactions::category.asc()),
        (Category, SortOrder::Desc) => query.order(transactions::category.desc()),
        (Type, SortOrder::Asc) => query.order(transactions::transaction_type.asc()),
        (Type, SortOrder::Desc) => query.order(transactions::transaction_type.desc()),
        (CreatedAt, SortOrder::Asc) => query.order(transactions::created_at.asc()),
        (CreatedAt, SortOrder::Desc) => query.order(transactions::created_at.desc()),
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Transaction::try_from)
            .transpose()
    }

    fn find_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
        sort: Option<TransactionSort>,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = filtered_query(user_id, filter);
        query = match sort {
            Some(sort) => sorted(query, sort),
            None => query.order(transactions::created_at.asc()),
        };

        let rows = query
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let tx = Transaction::try_from(row)?;
            if filter.tags.is_empty() || tx.tags.iter().any(|t| filter.tags.contains(t)) {
                result.push(tx);
            }
        }
        Ok(result)
    }

    fn count_transactions(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .count()
            .get_result(&mut conn)
            .into_core()
    }

    async fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        let row = TransactionDB::try_from(transaction)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Transaction::try_from(inserted)
            })
            .await
    }

    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        let row = TransactionDB::try_from(transaction)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let updated = diesel::update(transactions::table.find(row.id.clone()))
                    .set(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Transaction::try_from(updated)
            })
            .await
    }

    async fn delete_transaction(&self, transaction_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(transactions::table.find(transaction_id))
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
    use crate::users::UserRepository;
    use chrono::{NaiveDate, NaiveDateTime};
    use fintrack_core::transactions::{RecurrencePattern, TransactionType};
    use fintrack_core::users::{User, UserRepositoryTrait, UserRole};
    use tempfile::tempdir;

    struct Fixture {
        transactions: TransactionRepository,
        users: UserRepository,
        _dir: tempfile::TempDir,
    }

    async fn setup() -> Fixture {
        let dir = tempdir().expect("Failed to create temp directory");
        let db_path = dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        let users = UserRepository::new(Arc::clone(&pool), writer.clone());
        let at = day(1);
        users
            .insert_user(User {
                id: "u1".into(),
                name: "Sam".into(),
                email: "sam@example.com".into(),
                role: UserRole::User,
                is_active: true,
                created_at: at,
                updated_at: at,
            })
            .await
            .expect("Failed to insert user");
        Fixture {
            transactions: TransactionRepository::new(pool, writer),
            users,
            _dir: dir,
        }
    }

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn tx(id: &str, kind: TransactionType, amount: f64, category: &str, d: u32) -> Transaction {
        Transaction {
            id: id.into(),
            user_id: "u1".into(),
            transaction_type: kind,
            amount,
            category: category.into(),
            description: None,
            date: day(d),
            tags: vec![],
            is_recurring: false,
            recurrence_pattern: None,
            recurrence_end_date: None,
            created_at: day(d),
            updated_at: day(d),
        }
    }

    #[tokio::test]
    async fn stores_tags_and_recurrence() {
        let f = setup().await;
        let mut rent = tx("t1", TransactionType::Expense, 900.0, "Rent", 1);
        rent.tags = vec!["home".into(), "fixed".into()];
        rent.is_recurring = true;
        rent.recurrence_pattern = Some(RecurrencePattern::Monthly);
        f.transactions.insert_transaction(rent.clone()).await.unwrap();

        let loaded = f.transactions.get_transaction("t1").unwrap().unwrap();
        assert_eq!(loaded, rent);
        assert!(f.transactions.get_transaction("missing").unwrap().is_none());
    }

    #[tokio::test]
    async fn filters_and_sorts_in_sql() {
        let f = setup().await;
        let mut lunch = tx("t1", TransactionType::Expense, 12.5, "Food", 3);
        lunch.tags = vec!["work".into()];
        f.transactions.insert_transaction(lunch).await.unwrap();
        f.transactions
            .insert_transaction(tx("t2", TransactionType::Expense, 80.0, "Food", 10))
            .await
            .unwrap();
        f.transactions
            .insert_transaction(tx("t3", TransactionType::Income, 2000.0, "Salary", 5))
            .await
            .unwrap();

        let food = TransactionFilter {
            category: Some("Food".into()),
            start_date: Some(day(2)),
            end_date: Some(day(10)),
            ..Default::default()
        };
        let by_amount = TransactionSort {
            field: TransactionSortField::Amount,
            order: SortOrder::Desc,
        };
        let ids: Vec<_> = f
            .transactions
            .find_transactions("u1", &food, Some(by_amount))
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["t2", "t1"]);

        let tagged = TransactionFilter {
            tags: vec!["work".into()],
            ..Default::default()
        };
        let hits = f.transactions.find_transactions("u1", &tagged, None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "t1");

        let incomes = f
            .transactions
            .find_transactions("u1", &TransactionFilter::of_type(TransactionType::Income), None)
            .unwrap();
        assert_eq!(incomes.len(), 1);
        assert!(f
            .transactions
            .find_transactions("someone-else", &TransactionFilter::default(), None)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn update_and_delete() {
        let f = setup().await;
        let mut t = f
            .transactions
            .insert_transaction(tx("t1", TransactionType::Expense, 10.0, "Food", 1))
            .await
            .unwrap();
        t.amount = 25.0;
        t.description = Some("dinner".into());
        let updated = f.transactions.update_transaction(t).await.unwrap();
        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.description.as_deref(), Some("dinner"));

        assert_eq!(f.transactions.count_transactions().unwrap(), 1);
        assert_eq!(f.transactions.delete_transaction("t1".into()).await.unwrap(), 1);
        assert_eq!(f.transactions.count_transactions().unwrap(), 0);
    }

    #[tokio::test]
    async fn deleting_the_owner_cascades() {
        let f = setup().await;
        f.transactions
            .insert_transaction(tx("t1", TransactionType::Expense, 10.0, "Food", 1))
            .await
            .unwrap();
        f.users.delete_user("u1".into()).await.unwrap();
        assert_eq!(f.transactions.count_transactions().unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_owner_is_rejected() {
        let f = setup().await;
        let mut orphan = tx("t1", TransactionType::Expense, 10.0, "Food", 1);
        orphan.user_id = "ghost".into();
        assert!(f.transactions.insert_transaction(orphan).await.is_err());
    }
}
