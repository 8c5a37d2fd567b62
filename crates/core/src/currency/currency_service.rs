use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::currency::currency_model::{CurrencyPreference, CurrencyPreferenceInput, ExchangeRates};
use crate::currency::currency_traits::{
    CurrencyPreferenceRepositoryTrait, CurrencyServiceTrait, ExchangeRateProviderTrait,
};
use crate::errors::{Error, Result};
use crate::users::UserContext;

pub struct CurrencyService {
    preference_repo: Arc<dyn CurrencyPreferenceRepositoryTrait>,
    rate_provider: Arc<dyn ExchangeRateProviderTrait>,
}

impl CurrencyService {
    pub fn new(
        preference_repo: Arc<dyn CurrencyPreferenceRepositoryTrait>,
        rate_provider: Arc<dyn ExchangeRateProviderTrait>,
    ) -> Self {
        CurrencyService {
            preference_repo,
            rate_provider,
        }
    }
}

#[async_trait]
impl CurrencyServiceTrait for CurrencyService {
    async fn set_preferred_currencies(
        &self,
        ctx: &UserContext,
        input: CurrencyPreferenceInput,
    ) -> Result<CurrencyPreference> {
        let (base_currency, preferred_currencies) = match (
            input.base_currency.filter(|b| !b.trim().is_empty()),
            input.preferred_currencies,
        ) {
            (Some(base), Some(preferred)) => (base, preferred),
            _ => {
                return Err(Error::invalid_input(
                    "Base currency and preferred currencies are required",
                ))
            }
        };

        let now = Utc::now().naive_utc();
        let preference = match self.preference_repo.get_preference(&ctx.user_id)? {
            Some(existing) => CurrencyPreference {
                base_currency,
                preferred_currencies,
                updated_at: now,
                ..existing
            },
            None => CurrencyPreference {
                id: Uuid::new_v4().to_string(),
                user_id: ctx.user_id.clone(),
                base_currency,
                preferred_currencies,
                created_at: now,
                updated_at: now,
            },
        };
        let saved = self.preference_repo.upsert_preference(preference).await?;
        info!(
            "Currency preferences for user {} set to base {}",
            ctx.user_id, saved.base_currency
        );
        Ok(saved)
    }

    async fn get_exchange_rates(&self, ctx: &UserContext) -> Result<ExchangeRates> {
        let preference = self
            .preference_repo
            .get_preference(&ctx.user_id)?
            .ok_or_else(|| Error::invalid_input("User currency settings not found"))?;

        let rates = self
            .rate_provider
            .latest_rates(&preference.base_currency)
            .await?;
        let exchange_rates: BTreeMap<String, f64> = preference
            .preferred_currencies
            .iter()
            .filter_map(|code| rates.get(code).map(|rate| (code.clone(), *rate)))
            .collect();

        Ok(ExchangeRates {
            base_currency: preference.base_currency,
            exchange_rates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserRole;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockPreferenceRepository {
        preferences: RwLock<Vec<CurrencyPreference>>,
    }

    #[async_trait]
    impl CurrencyPreferenceRepositoryTrait for MockPreferenceRepository {
        fn get_preference(&self, user_id: &str) -> Result<Option<CurrencyPreference>> {
            Ok(self
                .preferences
                .read()
                .unwrap()
                .iter()
                .find(|p| p.user_id == user_id)
                .cloned())
        }

        async fn upsert_preference(
            &self,
            preference: CurrencyPreference,
        ) -> Result<CurrencyPreference> {
            let mut all = self.preferences.write().unwrap();
            all.retain(|p| p.user_id != preference.user_id);
            all.push(preference.clone());
            Ok(preference)
        }
    }

    struct FixedRates;

    #[async_trait]
    impl ExchangeRateProviderTrait for FixedRates {
        async fn latest_rates(&self, base_currency: &str) -> Result<HashMap<String, f64>> {
            assert_eq!(base_currency, "USD");
            Ok(HashMap::from([
                ("USD".to_string(), 1.0),
                ("EUR".to_string(), 0.92),
                ("JPY".to_string(), 151.3),
            ]))
        }
    }

    fn service() -> CurrencyService {
        CurrencyService::new(Arc::new(MockPreferenceRepository::default()), Arc::new(FixedRates))
    }

    fn alice() -> UserContext {
        UserContext::new("alice", UserRole::User)
    }

    fn input(base: &str, preferred: &[&str]) -> CurrencyPreferenceInput {
        CurrencyPreferenceInput {
            base_currency: Some(base.to_string()),
            preferred_currencies: Some(preferred.iter().map(|c| c.to_string()).collect()),
        }
    }

    #[tokio::test]
    async fn rates_without_settings_is_a_validation_error() {
        assert!(matches!(
            service().get_exchange_rates(&alice()).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn both_fields_are_required() {
        let missing = CurrencyPreferenceInput {
            base_currency: Some("USD".to_string()),
            preferred_currencies: None,
        };
        assert!(matches!(
            service().set_preferred_currencies(&alice(), missing).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn upsert_keeps_one_record_and_filters_rates() {
        let service = service();
        let first = service
            .set_preferred_currencies(&alice(), input("GBP", &["EUR"]))
            .await
            .unwrap();
        let second = service
            .set_preferred_currencies(&alice(), input("USD", &["EUR", "JPY", "XXX"]))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.base_currency, "USD");

        let rates = service.get_exchange_rates(&alice()).await.unwrap();
        assert_eq!(rates.base_currency, "USD");
        assert_eq!(
            rates.exchange_rates.keys().collect::<Vec<_>>(),
            vec!["EUR", "JPY"]
        );
    }
}
