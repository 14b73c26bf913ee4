//! Page-facing queries built on the read API.

use std::sync::Arc;

use futures_util::future::join_all;

use nenpyo_core::history::{
    self, HistoryEvent, Month, MonthRecord, MonthStatistics, ParamError, Year, YearRecord,
    YearStatistics,
};
use nenpyo_core::storage::HistoryRepository;

/// Statistics and raw-parameter lookups over a [`HistoryRepository`].
#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn HistoryRepository> {
        &self.repository
    }

    /// Event and month counts for `year`.
    pub async fn year_statistics(&self, year: Year) -> YearStatistics {
        let (events, months) = tokio::join!(
            self.repository.all_events_for_year(year),
            self.repository.available_months(year),
        );

        YearStatistics {
            year,
            total_events: events.len(),
            months_with_data: months.len(),
        }
    }

    /// Event count for one month, or `None` when the month has no record.
    pub async fn month_statistics(&self, year: Year, month: Month) -> Option<MonthStatistics> {
        let record = self.repository.month_record(year, month).await?;

        Some(MonthStatistics {
            year,
            month,
            event_count: record.events.len(),
        })
    }

    /// Number of events across every available year.
    pub async fn total_event_count(&self) -> usize {
        let years = self.repository.available_years().await;
        let loads = years
            .iter()
            .map(|&year| self.repository.all_events_for_year(year));

        join_all(loads).await.iter().map(Vec::len).sum()
    }

    pub fn parse_year_param(&self, value: &str) -> Result<Year, ParamError> {
        history::parse_year_param(value)
    }

    pub fn parse_month_param(&self, value: &str) -> Result<Month, ParamError> {
        history::parse_month_param(value)
    }

    /// Months with content in `year`; empty for an out-of-range year.
    pub async fn months_for(&self, year: i64) -> Vec<Month> {
        match checked_year(year) {
            Some(year) => self.repository.available_months(year).await,
            None => Vec::new(),
        }
    }

    /// The year summary; `None` for an out-of-range year.
    pub async fn year_record_for(&self, year: i64) -> Option<YearRecord> {
        self.repository.year_record(checked_year(year)?).await
    }

    /// One month of events; `None` when either identifier is out of range.
    pub async fn month_record_for(&self, year: i64, month: i64) -> Option<MonthRecord> {
        let year = checked_year(year)?;
        let month = match Month::new(month) {
            Ok(month) => month,
            Err(err) => {
                tracing::debug!(error = %err, "Rejected month identifier");
                return None;
            }
        };
        self.repository.month_record(year, month).await
    }

    /// Every event of `year` by date; empty for an out-of-range year.
    pub async fn events_for(&self, year: i64) -> Vec<HistoryEvent> {
        match checked_year(year) {
            Some(year) => self.repository.all_events_for_year(year).await,
            None => Vec::new(),
        }
    }
}

fn checked_year(value: i64) -> Option<Year> {
    Year::new(value)
        .inspect_err(|err| tracing::debug!(error = %err, "Rejected year identifier"))
        .ok()
}
