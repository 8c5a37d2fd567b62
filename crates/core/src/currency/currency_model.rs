//! Currency preference models.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A user's base currency and the currencies they want quoted against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPreference {
    pub id: String,
    pub user_id: String,
    pub base_currency: String,
    pub preferred_currencies: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPreferenceInput {
    pub base_currency: Option<String>,
    pub preferred_currencies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRates {
    pub base_currency: String,
    pub exchange_rates: BTreeMap<String, f64>,
}
