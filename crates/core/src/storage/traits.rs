use async_trait::async_trait;

use crate::history::{HistoryEvent, Month, MonthRecord, Year, YearRecord};

use super::Result;

/// Read-only access to the content store.
///
/// This is the capability the repository is built on. The filesystem adapter
/// is the production implementation; tests substitute their own.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Lists the years that have a content directory, ascending.
    async fn list_years(&self) -> Result<Vec<Year>>;

    /// Lists the months that have a content file for `year`, ascending.
    async fn list_months(&self, year: Year) -> Result<Vec<Month>>;

    /// Loads the year summary. A missing file is `Ok(None)`.
    async fn load_year_record(&self, year: Year) -> Result<Option<YearRecord>>;

    /// Loads one month. A missing file is `Ok(None)`.
    async fn load_month_record(&self, year: Year, month: Month) -> Result<Option<MonthRecord>>;
}

/// The read API consumed by page rendering.
///
/// Every method is infallible: failures underneath degrade to an empty list
/// or `None`.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Years with content, ascending.
    async fn available_years(&self) -> Vec<Year>;

    /// Months with content in `year`, ascending.
    async fn available_months(&self, year: Year) -> Vec<Month>;

    /// The year summary, if any.
    async fn year_record(&self, year: Year) -> Option<YearRecord>;

    /// One month of events, if any.
    async fn month_record(&self, year: Year, month: Month) -> Option<MonthRecord>;

    /// Every month record of `year`, month-ascending.
    async fn all_months_for_year(&self, year: Year) -> Vec<MonthRecord>;

    /// Every event of `year`, sorted by date.
    async fn all_events_for_year(&self, year: Year) -> Vec<HistoryEvent>;
}
