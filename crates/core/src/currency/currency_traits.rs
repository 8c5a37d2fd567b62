use std::collections::HashMap;

use crate::currency::currency_model::{CurrencyPreference, CurrencyPreferenceInput, ExchangeRates};
use crate::errors::Result;
use crate::users::UserContext;
use async_trait::async_trait;

/// Trait for currency preference repository operations
#[async_trait]
pub trait CurrencyPreferenceRepositoryTrait: Send + Sync {
    fn get_preference(&self, user_id: &str) -> Result<Option<CurrencyPreference>>;
    /// Inserts or replaces the single preference record of `preference.user_id`.
    async fn upsert_preference(&self, preference: CurrencyPreference)
        -> Result<CurrencyPreference>;
}

/// Source of latest conversion rates for a base currency.
#[async_trait]
pub trait ExchangeRateProviderTrait: Send + Sync {
    async fn latest_rates(&self, base_currency: &str) -> Result<HashMap<String, f64>>;
}

/// Trait for currency service operations
#[async_trait]
pub trait CurrencyServiceTrait: Send + Sync {
    async fn set_preferred_currencies(
        &self,
        ctx: &UserContext,
        input: CurrencyPreferenceInput,
    ) -> Result<CurrencyPreference>;
    async fn get_exchange_rates(&self, ctx: &UserContext) -> Result<ExchangeRates>;
}
