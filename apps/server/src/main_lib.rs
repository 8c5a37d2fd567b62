use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, AuthManager},
    config::Config,
};
use fintrack_core::{
    budgets::{BudgetService, BudgetServiceTrait},
    currency::{CurrencyService, CurrencyServiceTrait, ExchangeRateApiClient},
    dashboard::{DashboardService, DashboardServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    notifications::{NotificationService, NotificationServiceTrait},
    reports::{ReportService, ReportServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use fintrack_storage_sqlite::{
    budgets::BudgetRepository,
    currency::CurrencyPreferenceRepository,
    db::{self, write_actor},
    goals::GoalRepository,
    transactions::TransactionRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub report_service: Arc<dyn ReportServiceTrait + Send + Sync>,
    pub notification_service: Arc<dyn NotificationServiceTrait + Send + Sync>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait + Send + Sync>,
    pub currency_service: Arc<dyn CurrencyServiceTrait + Send + Sync>,
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let preference_repo = Arc::new(CurrencyPreferenceRepository::new(
        pool.clone(),
        writer.clone(),
    ));

    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo.clone()));
    let budget_service = Arc::new(BudgetService::new(
        budget_repo.clone(),
        transaction_repo.clone(),
    ));
    let goal_service = Arc::new(GoalService::new(
        goal_repo.clone(),
        transaction_repo.clone(),
    ));
    let report_service = Arc::new(ReportService::new(transaction_repo.clone()));
    let notification_service = Arc::new(NotificationService::new(
        transaction_repo.clone(),
        goal_repo.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        user_repo,
        transaction_repo,
        budget_repo,
        goal_repo,
    ));

    if config.exchange_rate_api_key.is_none() {
        tracing::warn!("FT_EXCHANGE_RATE_API_KEY is not set; exchange rate lookups will fail");
    }
    let rate_provider = Arc::new(ExchangeRateApiClient::new(
        config.exchange_rate_api_url.clone(),
        config.exchange_rate_api_key.clone(),
    ));
    let currency_service = Arc::new(CurrencyService::new(preference_repo, rate_provider));

    if let Some(email) = &config.bootstrap_admin_email {
        let admin = user_service
            .ensure_admin(&config.bootstrap_admin_name, email)
            .await?;
        tracing::info!("Bootstrap admin available as {}", admin.id);
    }

    let secret = decode_secret_key(&config.jwt_secret)?;
    let auth = Arc::new(AuthManager::new(&secret, config.token_ttl));

    Ok(Arc::new(AppState {
        transaction_service,
        budget_service,
        goal_service,
        report_service,
        notification_service,
        dashboard_service,
        currency_service,
        user_service,
        auth,

    }))
}
