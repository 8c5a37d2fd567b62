use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use fintrack_core::currency::{CurrencyPreference, CurrencyPreferenceRepositoryTrait};
use fintrack_core::Result;

use super::model::CurrencyPreferenceDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::currency_preferences;

pub struct CurrencyPreferenceRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CurrencyPreferenceRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CurrencyPreferenceRepository { pool, writer }
    }
}

#[async_trait]
impl CurrencyPreferenceRepositoryTrait for CurrencyPreferenceRepository {
    fn get_preference(&self, user_id: &str) -> Result<Option<CurrencyPreference>> {
        let mut conn = get_connection(&self.pool)?;
        currency_preferences::table
            .filter(currency_preferences::user_id.eq(user_id))
            .select(CurrencyPreferenceDB::as_select())
            .first::<CurrencyPreferenceDB>(&mut conn)
            .optional()
            .into_core()?
            .map(CurrencyPreference::try_from)
            .transpose()
    }

    /// One row per user; a second save replaces the codes in place.
    async fn upsert_preference(
        &self,
        preference: CurrencyPreference,
    ) -> Result<CurrencyPreference> {
        let row = CurrencyPreferenceDB::try_from(preference)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CurrencyPreference> {
                let saved = diesel::insert_into(currency_preferences::table)
                    .values(&row)
                    .on_conflict(currency_preferences::user_id)
                    .do_update()
                    .set((
                        currency_preferences::base_currency.eq(&row.base_currency),
                        currency_preferences::preferred_currencies.eq(&row.preferred_currencies),
                        currency_preferences::updated_at.eq(row.updated_at),
                    ))
                    .returning(CurrencyPreferenceDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                CurrencyPreference::try_from(saved)
            })
            .await
    }
}
