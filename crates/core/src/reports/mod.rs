//! Reports module - spending aggregation and report services.

mod reports_model;
mod reports_service;
mod reports_traits;
pub mod spending_aggregator;

pub use reports_model::{
    CategorySummary, MonthlyTotals, SpendingSummary, VisualizationData, VisualizationQuery,
};
pub use reports_service::ReportService;
pub use reports_traits::ReportServiceTrait;
pub use spending_aggregator::{aggregate, monthly_trends};
