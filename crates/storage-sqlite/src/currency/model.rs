//! Database model for per-user currency preferences.

use diesel::prelude::*;
use fintrack_core::currency::CurrencyPreference;
use fintrack_core::errors::Error;

use crate::utils::{from_json_text, to_json_text};

/// `preferred_currencies` is stored as a JSON array of currency codes.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::currency_preferences)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrencyPreferenceDB {
    pub id: String,
    pub user_id: String,
    pub base_currency: String,
    pub preferred_currencies: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl TryFrom<CurrencyPreferenceDB> for CurrencyPreference {
    type Error = Error;

    fn try_from(db: CurrencyPreferenceDB) -> Result<Self, Self::Error> {
        Ok(Self {
            preferred_currencies: from_json_text(&db.preferred_currencies)?,
            id: db.id,
            user_id: db.user_id,
            base_currency: db.base_currency,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl TryFrom<CurrencyPreference> for CurrencyPreferenceDB {
    type Error = Error;

    fn try_from(domain: CurrencyPreference) -> Result<Self, Self::Error> {
        Ok(Self {
            preferred_currencies: to_json_text(&domain.preferred_currencies)?,
            id: domain.id,
            user_id: domain.user_id,
            base_currency: domain.base_currency,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        })
    }
}
