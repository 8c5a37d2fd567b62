//! HTTP client for the ExchangeRate-API `latest` endpoint.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::currency::currency_traits::ExchangeRateProviderTrait;
use crate::errors::{Error, Result};

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: Option<HashMap<String, f64>>,
}

impl LatestRatesResponse {
    fn into_rates(self) -> Result<HashMap<String, f64>> {
        if let Some(error_type) = self.error_type {
            return Err(Error::Upstream(format!(
                "Exchange rate lookup failed: {error_type}"
            )));
        }
        match (self.result.as_deref(), self.conversion_rates) {
            (Some("error"), _) | (_, None) => Err(Error::Upstream(
                "Failed to fetch exchange rates".to_string(),
            )),
            (_, Some(rates)) => Ok(rates),
        }
    }
}

pub struct ExchangeRateApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExchangeRateApiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl ExchangeRateProviderTrait for ExchangeRateApiClient {
    async fn latest_rates(&self, base_currency: &str) -> Result<HashMap<String, f64>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Upstream("Exchange rate API key is not configured".to_string())
        })?;
        let url = format!("{}/{}/latest/{}", self.base_url, api_key, base_currency);
        debug!("Fetching latest exchange rates for {}", base_currency);

        let response = self.client.get(&url).send().await.map_err(|e| {
            // The URL carries the API key.
            let e = e.without_url();
            warn!("Exchange rate request failed: {}", e);
            Error::Upstream(e.to_string())
        })?;
        let status = response.status();
        let body: LatestRatesResponse = response.json().await.map_err(|e| {
            Error::Upstream(format!(
                "Invalid exchange rate response ({status}): {}",
                e.without_url()
            ))
        })?;
        body.into_rates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_payload_yields_rates() {
        let body: LatestRatesResponse = serde_json::from_str(
            r#"{"result":"success","base_code":"USD","conversion_rates":{"USD":1,"EUR":0.91}}"#,
        )
        .unwrap();
        let rates = body.into_rates().unwrap();
        assert_eq!(rates["EUR"], 0.91);
    }

    #[test]
    fn error_payload_is_upstream_failure() {
        let body: LatestRatesResponse =
            serde_json::from_str(r#"{"result":"error","error-type":"invalid-key"}"#).unwrap();
        let err = body.into_rates().unwrap_err();
        assert!(matches!(err, Error::Upstream(ref m) if m.contains("invalid-key")));
    }

    #[test]
    fn missing_rates_is_upstream_failure() {
        let body: LatestRatesResponse = serde_json::from_str(r#"{"result":"success"}"#).unwrap();
        assert!(matches!(body.into_rates(), Err(Error::Upstream(_))));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let client = ExchangeRateApiClient::new("http://127.0.0.1:9", None);
        assert!(matches!(
            client.latest_rates("USD").await,
            Err(Error::Upstream(_))
        ));
    }
}
