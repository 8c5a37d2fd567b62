use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw HS256 secret shared with the identity provider.
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub exchange_rate_api_url: String,
    pub exchange_rate_api_key: Option<String>,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_name: String,
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = var_or("FT_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let db_path = var_or("FT_DB_PATH", "./db/app.db");
        let cors_allow = var_or("FT_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var_or("FT_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let jwt_secret = non_empty_var("FT_JWT_SECRET").context("FT_JWT_SECRET must be set")?;
        let ttl_secs: u64 = var_or("FT_TOKEN_TTL_SECS", "86400")
            .parse()
            .unwrap_or(86400);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            exchange_rate_api_url: var_or(
                "FT_EXCHANGE_RATE_API_URL",
                "https://v6.exchangerate-api.com/v6",
            ),
            exchange_rate_api_key: non_empty_var("FT_EXCHANGE_RATE_API_KEY"),
            bootstrap_admin_email: non_empty_var("FT_BOOTSTRAP_ADMIN_EMAIL"),
            bootstrap_admin_name: var_or("FT_BOOTSTRAP_ADMIN_NAME", "Administrator"),
        })
    }
}
