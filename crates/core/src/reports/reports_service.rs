use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use log::debug;

use crate::errors::Result;
use crate::reports::reports_model::{MonthlyTotals, VisualizationData, VisualizationQuery};
use crate::reports::reports_traits::ReportServiceTrait;
use crate::reports::spending_aggregator;
use crate::transactions::{
    Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionSort,
};
use crate::users::UserContext;
use crate::utils::time_utils::{month_bounds, year_bounds};

pub struct ReportService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl ReportService {
    pub fn new(transaction_repo: Arc<dyn TransactionRepositoryTrait>) -> Self {
        ReportService { transaction_repo }
    }

    fn window_filter(query: &VisualizationQuery) -> TransactionFilter {
        let bounds = match (query.custom_range(), query.period.as_deref()) {
            (Some(range), _) => Some(range),
            (None, Some("month")) => Some(month_bounds(Utc::now().naive_utc())),
            (None, Some("year")) => Some(year_bounds(Utc::now().naive_utc())),
            _ => None,
        };
        TransactionFilter {
            start_date: bounds.map(|(start, _)| start),
            end_date: bounds.map(|(_, end)| end),
            ..TransactionFilter::default()
        }
    }
}

impl ReportServiceTrait for ReportService {
    fn get_spending_trends(&self, ctx: &UserContext) -> Result<BTreeMap<String, MonthlyTotals>> {
        let transactions = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &TransactionFilter::default(),
            Some(TransactionSort::date_ascending()),
        )?;
        Ok(spending_aggregator::monthly_trends(&transactions))
    }

    fn get_visualization_data(
        &self,
        ctx: &UserContext,
        query: &VisualizationQuery,
    ) -> Result<VisualizationData> {
        let filter = Self::window_filter(query);
        debug!(
            "Visualization window for user {}: {:?} to {:?}",
            ctx.user_id, filter.start_date, filter.end_date
        );
        let transactions = self.transaction_repo.find_transactions(
            &ctx.user_id,
            &filter,
            Some(TransactionSort::date_ascending()),
        )?;
        Ok(VisualizationData::from_summary(
            spending_aggregator::aggregate(&transactions),
            query.label(),
        ))
    }

    fn get_filtered_report(
        &self,
        ctx: &UserContext,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        self.transaction_repo.find_transactions(
            &ctx.user_id,
            filter,
            Some(TransactionSort::date_descending()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{MockTransactionRepository, TransactionType};
    use crate::users::UserRole;
    use chrono::{Duration, NaiveDateTime};

    fn tx(kind: TransactionType, amount: f64, date: NaiveDateTime) -> Transaction {
        Transaction {
            id: format!("{kind}-{amount}"),
            user_id: "alice".into(),
            transaction_type: kind,
            amount,
            category: "General".into(),
            description: None,
            date,
            tags: vec![],
            is_recurring: false,
            recurrence_pattern: None,
            recurrence_end_date: None,
            created_at: date,
            updated_at: date,
        }
    }

    fn service() -> ReportService {
        let now = Utc::now().naive_utc();
        ReportService::new(Arc::new(MockTransactionRepository::with(vec![
            tx(TransactionType::Income, 1000.0, now),
            tx(TransactionType::Expense, 250.0, now - Duration::days(800)),
        ])))
    }

    fn alice() -> UserContext {
        UserContext::new("alice", UserRole::User)
    }

    #[test]
    fn all_time_visualization_includes_everything() {
        let data = service()
            .get_visualization_data(&alice(), &VisualizationQuery::default())
            .unwrap();
        assert_eq!(data.period, "all");
        assert_eq!(data.total_income, 1000.0);
        assert_eq!(data.total_expenses, 250.0);
        assert_eq!(data.balance, 750.0);
        assert_eq!(data.monthly_data.len(), 2);
    }

    #[test]
    fn year_period_drops_older_transactions() {
        let query = VisualizationQuery {
            period: Some("year".to_string()),
            ..Default::default()
        };
        let data = service().get_visualization_data(&alice(), &query).unwrap();
        assert_eq!(data.period, "year");
        assert_eq!(data.total_expenses, 0.0);
        assert_eq!(data.total_income, 1000.0);
    }

    #[test]
    fn custom_range_is_labelled_custom() {
        let now = Utc::now().naive_utc();
        let query = VisualizationQuery {
            period: None,
            start_date: Some(now - Duration::days(900)),
            end_date: Some(now - Duration::days(700)),
        };
        let data = service().get_visualization_data(&alice(), &query).unwrap();
        assert_eq!(data.period, "custom");
        assert_eq!(data.total_expenses, 250.0);
        assert_eq!(data.total_income, 0.0);
    }

    #[test]
    fn filtered_report_is_newest_first() {
        let report = service()
            .get_filtered_report(&alice(), &TransactionFilter::default())
            .unwrap();
        assert_eq!(report.len(), 2);
        assert!(report[0].date > report[1].date);
    }
}
