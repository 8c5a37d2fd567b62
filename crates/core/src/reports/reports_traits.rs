use std::collections::BTreeMap;

use crate::errors::Result;
use crate::reports::reports_model::{MonthlyTotals, VisualizationData, VisualizationQuery};
use crate::transactions::{Transaction, TransactionFilter};
use crate::users::UserContext;

/// Trait for report service operations
pub trait ReportServiceTrait: Send + Sync {
    fn get_spending_trends(&self, ctx: &UserContext) -> Result<BTreeMap<String, MonthlyTotals>>;
    fn get_visualization_data(
        &self,
        ctx: &UserContext,
        query: &VisualizationQuery,
    ) -> Result<VisualizationData>;
    /// Matching transactions, newest first.
    fn get_filtered_report(
        &self,
        ctx: &UserContext,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;
}
