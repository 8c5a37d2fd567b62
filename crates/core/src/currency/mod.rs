//! Currency module - preferences and exchange-rate lookup.

mod currency_model;
mod currency_service;
mod currency_traits;
mod exchange_rate_client;

pub use currency_model::{CurrencyPreference, CurrencyPreferenceInput, ExchangeRates};
pub use currency_service::CurrencyService;
pub use currency_traits::{
    CurrencyPreferenceRepositoryTrait, CurrencyServiceTrait, ExchangeRateProviderTrait,
};
pub use exchange_rate_client::ExchangeRateApiClient;
