//! Cached history repository decorator.
//!
//! Every source read goes through the cache. Failures are logged, degraded to
//! an empty list or `None`, and cached like any other result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;

use nenpyo_core::cache::{
    available_months_key, available_years_key, deserialize_month_record, deserialize_months,
    deserialize_year_record, deserialize_years, month_record_key, serialize_month_record,
    serialize_months, serialize_year_record, serialize_years, year_record_key, Cache,
    SerializationError,
};
use nenpyo_core::history::{
    flatten_month_events, HistoryEvent, Month, MonthRecord, Year, YearRecord, MAX_MONTH,
    MIN_MONTH,
};
use nenpyo_core::storage::{HistoryRepository, HistorySource};

type Encode<T> = fn(&T) -> Result<Vec<u8>, SerializationError>;
type Decode<T> = fn(&[u8]) -> Result<T, SerializationError>;

/// Cached history repository decorator.
///
/// # Type Parameters
///
/// * `S` - The content source
/// * `C` - The cache implementation
pub struct CachedHistoryRepository<S, C>
where
    S: HistorySource,
    C: Cache,
{
    source: Arc<S>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<S, C> CachedHistoryRepository<S, C>
where
    S: HistorySource,
    C: Cache,
{
    /// Creates a new cached repository.
    ///
    /// # Arguments
    ///
    /// * `source` - The content source to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Default time-to-live for cached values
    pub fn new(source: Arc<S>, cache: Arc<C>, ttl: Duration) -> Self {
        Self { source, cache, ttl }
    }

    /// The default time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops every cached value.
    pub async fn invalidate_all(&self) {
        match self.cache.clear().await {
            Ok(()) => tracing::debug!("History cache cleared"),
            Err(err) => tracing::warn!(error = %err, "Failed to clear history cache"),
        }
    }

    /// Drops every cached value derived from `year`'s directory.
    ///
    /// The year list is dropped too, since the directory may be new.
    pub async fn invalidate_year(&self, year: Year) {
        let months = (MIN_MONTH..=MAX_MONTH).filter_map(|m| Month::new(i64::from(m)).ok());
        let keys = [
            available_years_key(),
            available_months_key(year),
            year_record_key(year),
        ]
        .into_iter()
        .chain(months.map(|month| month_record_key(year, month)));

        for key in keys {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(key = %key, error = %err, "Failed to invalidate cache entry");
            }
        }
        tracing::debug!(year = %year, "History cache invalidated for year");
    }

    /// [`HistoryRepository::available_years`] with an explicit TTL.
    pub async fn available_years_with_ttl(&self, ttl: Duration) -> Vec<Year> {
        self.read_through(
            &available_years_key(),
            ttl,
            |years: &Vec<Year>| serialize_years(years),
            deserialize_years,
            self.fetch_years(),
        )
        .await
    }

    /// [`HistoryRepository::available_months`] with an explicit TTL.
    pub async fn available_months_with_ttl(&self, year: Year, ttl: Duration) -> Vec<Month> {
        self.read_through(
            &available_months_key(year),
            ttl,
            |months: &Vec<Month>| serialize_months(months),
            deserialize_months,
            self.fetch_months(year),
        )
        .await
    }

    /// [`HistoryRepository::year_record`] with an explicit TTL.
    pub async fn year_record_with_ttl(&self, year: Year, ttl: Duration) -> Option<YearRecord> {
        self.read_through(
            &year_record_key(year),
            ttl,
            |record: &Option<YearRecord>| serialize_year_record(record.as_ref()),
            deserialize_year_record,
            self.fetch_year_record(year),
        )
        .await
    }

    /// [`HistoryRepository::month_record`] with an explicit TTL.
    pub async fn month_record_with_ttl(
        &self,
        year: Year,
        month: Month,
        ttl: Duration,
    ) -> Option<MonthRecord> {
        self.read_through(
            &month_record_key(year, month),
            ttl,
            |record: &Option<MonthRecord>| serialize_month_record(record.as_ref()),
            deserialize_month_record,
            self.fetch_month_record(year, month),
        )
        .await
    }

    /// Returns the cached value for `key`, or awaits `fetch` and caches its result.
    ///
    /// `fetch` is only polled on a miss.
    async fn read_through<T, F>(
        &self,
        key: &str,
        ttl: Duration,
        encode: Encode<T>,
        decode: Decode<T>,
        fetch: F,
    ) -> T
    where
        T: Send,
        F: Future<Output = T> + Send,
    {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match decode(&bytes) {
                Ok(value) => {
                    tracing::trace!(key, "Cache hit");
                    return value;
                }
                // Treat as a miss
                Err(err) => {
                    tracing::warn!(key, error = %err, "Cached value deserialization failed");
                }
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(key, error = %err, "Cache read failed"),
        }

        tracing::trace!(key, "Cache miss");
        let value = fetch.await;

        match encode(&value) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(key, &bytes, Some(ttl)).await {
                    tracing::warn!(key, error = %err, "Failed to cache value");
                }
            }
            Err(err) => tracing::warn!(key, error = %err, "Failed to serialize value"),
        }

        value
    }

    async fn fetch_years(&self) -> Vec<Year> {
        self.source.list_years().await.unwrap_or_else(|err| {
            tracing::error!(error = %err, "Failed to list years");
            Vec::new()
        })
    }

    async fn fetch_months(&self, year: Year) -> Vec<Month> {
        self.source.list_months(year).await.unwrap_or_else(|err| {
            tracing::error!(year = %year, error = %err, "Failed to list months");
            Vec::new()
        })
    }

    async fn fetch_year_record(&self, year: Year) -> Option<YearRecord> {
        self.source.load_year_record(year).await.unwrap_or_else(|err| {
            tracing::error!(year = %year, error = %err, "Failed to load year data");
            None
        })
    }

    async fn fetch_month_record(&self, year: Year, month: Month) -> Option<MonthRecord> {
        self.source
            .load_month_record(year, month)
            .await
            .unwrap_or_else(|err| {
                tracing::error!(
                    year = %year,
                    month = %month,
                    error = %err,
                    "Failed to load month data"
                );
                None
            })
    }
}

#[async_trait]
impl<S, C> HistoryRepository for CachedHistoryRepository<S, C>
where
    S: HistorySource + 'static,
    C: Cache + 'static,
{
    async fn available_years(&self) -> Vec<Year> {
        self.available_years_with_ttl(self.ttl).await
    }

    async fn available_months(&self, year: Year) -> Vec<Month> {
        self.available_months_with_ttl(year, self.ttl).await
    }

    async fn year_record(&self, year: Year) -> Option<YearRecord> {
        self.year_record_with_ttl(year, self.ttl).await
    }

    async fn month_record(&self, year: Year, month: Month) -> Option<MonthRecord> {
        self.month_record_with_ttl(year, month, self.ttl).await
    }

    async fn all_months_for_year(&self, year: Year) -> Vec<MonthRecord> {
        let months = self.available_months(year).await;
        let loads = months.iter().map(|&month| self.month_record(year, month));

        // join_all keeps input order, so the result stays month-ascending
        join_all(loads).await.into_iter().flatten().collect()
    }

    async fn all_events_for_year(&self, year: Year) -> Vec<HistoryEvent> {
        flatten_month_events(self.all_months_for_year(year).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::num::NonZeroUsize;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use nenpyo_core::history::EventCategory;
    use nenpyo_core::storage::{Result, SourceError};

    use crate::cache::MemoryCache;

    // Mock source that tracks calls
    #[derive(Default)]
    struct MockSource {
        years: Vec<Year>,
        months: HashMap<Year, Vec<Month>>,
        year_records: HashMap<Year, YearRecord>,
        month_records: HashMap<(Year, Month), MonthRecord>,
        failing: AtomicBool,
        list_years_calls: AtomicUsize,
        list_months_calls: AtomicUsize,
        year_record_calls: AtomicUsize,
        month_record_calls: AtomicUsize,
    }

    impl MockSource {
        fn failure(&self) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(SourceError::Io {
                    path: "data".to_string(),
                    message: "permission denied".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl HistorySource for MockSource {
        async fn list_years(&self) -> Result<Vec<Year>> {
            self.list_years_calls.fetch_add(1, Ordering::SeqCst);
            self.failure()?;
            Ok(self.years.clone())
        }

        async fn list_months(&self, year: Year) -> Result<Vec<Month>> {
            self.list_months_calls.fetch_add(1, Ordering::SeqCst);
            self.failure()?;
            Ok(self.months.get(&year).cloned().unwrap_or_default())
        }

        async fn load_year_record(&self, year: Year) -> Result<Option<YearRecord>> {
            self.year_record_calls.fetch_add(1, Ordering::SeqCst);
            self.failure()?;
            Ok(self.year_records.get(&year).cloned())
        }

        async fn load_month_record(&self, year: Year, month: Month) -> Result<Option<MonthRecord>> {
            self.month_record_calls.fetch_add(1, Ordering::SeqCst);
            self.failure()?;
            Ok(self.month_records.get(&(year, month)).cloned())
        }
    }

    fn year(value: i64) -> Year {
        Year::new(value).unwrap()
    }

    fn month(value: i64) -> Month {
        Month::new(value).unwrap()
    }

    fn event(date: (i32, u32, u32), title: &str) -> HistoryEvent {
        HistoryEvent::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title,
            EventCategory::PoliticsEconomy,
            "description",
        )
    }

    fn source_1945() -> MockSource {
        let mut source = MockSource {
            years: vec![year(1868), year(1945)],
            ..Default::default()
        };
        source.months.insert(year(1945), vec![month(3), month(8)]);
        source.year_records.insert(
            year(1945),
            YearRecord::new(year(1945)).with_summary("End of WWII"),
        );
        source.month_records.insert(
            (year(1945), month(8)),
            MonthRecord::new(
                year(1945),
                month(8),
                vec![
                    event((1945, 8, 15), "玉音放送"),
                    event((1945, 8, 6), "広島に原子爆弾投下"),
                ],
            ),
        );
        source.month_records.insert(
            (year(1945), month(3)),
            MonthRecord::new(year(1945), month(3), vec![event((1945, 3, 10), "東京大空襲")]),
        );
        source
    }

    fn create_repository(
        source: MockSource,
        ttl: Duration,
    ) -> (
        CachedHistoryRepository<MockSource, MemoryCache>,
        Arc<MockSource>,
        Arc<MemoryCache>,
    ) {
        let source = Arc::new(source);
        let cache = Arc::new(MemoryCache::new(NonZeroUsize::new(100).unwrap()));
        let repository = CachedHistoryRepository::new(source.clone(), cache.clone(), ttl);
        (repository, source, cache)
    }

    #[tokio::test]
    async fn test_available_years_cache_hit() {
        let (repository, source, _) = create_repository(source_1945(), Duration::from_secs(60));

        let first = repository.available_years().await;
        let second = repository.available_years().await;

        assert_eq!(first, vec![year(1868), year(1945)]);
        assert_eq!(first, second);
        assert_eq!(source.list_years_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_month_record_refetched_after_ttl() {
        let (repository, source, _) = create_repository(source_1945(), Duration::from_millis(50));

        repository.month_record(year(1945), month(8)).await;
        repository.month_record(year(1945), month(8)).await;
        assert_eq!(source.month_record_calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;

        let record = repository.month_record(year(1945), month(8)).await;
        assert!(record.is_some());
        assert_eq!(source.month_record_calls.load(Ordering::SeqCst), 2);

        repository.month_record(year(1945), month(8)).await;
        assert_eq!(source.month_record_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_record_is_cached() {
        let (repository, source, _) = create_repository(source_1945(), Duration::from_secs(60));

        assert!(repository.year_record(year(1868)).await.is_none());
        assert!(repository.year_record(year(1868)).await.is_none());

        assert_eq!(source.year_record_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_source_error_degrades_and_is_cached() {
        let source = source_1945();
        source.failing.store(true, Ordering::SeqCst);
        let (repository, source, _) = create_repository(source, Duration::from_secs(60));

        assert!(repository.available_years().await.is_empty());
        assert!(repository.available_months(year(1945)).await.is_empty());
        assert!(repository.year_record(year(1945)).await.is_none());
        assert!(repository.month_record(year(1945), month(8)).await.is_none());

        // Recovery is not visible until the entries expire
        source.failing.store(false, Ordering::SeqCst);
        assert!(repository.available_years().await.is_empty());
        assert_eq!(source.list_years_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_reload() {
        let (repository, source, cache) = create_repository(source_1945(), Duration::from_secs(60));

        repository.available_years().await;
        repository.invalidate_all().await;
        assert!(cache.is_empty().await);

        repository.available_years().await;
        assert_eq!(source.list_years_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_year_forces_reload_of_that_year_only() {
        let (repository, source, _) = create_repository(source_1945(), Duration::from_secs(60));

        repository.all_events_for_year(year(1945)).await;
        repository.year_record(year(1945)).await;
        repository.year_record(year(1868)).await;

        repository.invalidate_year(year(1945)).await;

        repository.all_events_for_year(year(1945)).await;
        repository.year_record(year(1945)).await;
        repository.year_record(year(1868)).await;
        repository.available_years().await;

        assert_eq!(source.list_months_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.month_record_calls.load(Ordering::SeqCst), 4);
        // One load per year before, 1945 reloaded after
        assert_eq!(source.year_record_calls.load(Ordering::SeqCst), 3);
        assert_eq!(source.list_years_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unrepresentable_ttl_is_cached_without_expiry() {
        let (repository, source, _) = create_repository(source_1945(), Duration::MAX);

        assert_eq!(repository.available_years().await.len(), 2);
        repository
            .year_record_with_ttl(year(1945), Duration::MAX)
            .await;
        repository.year_record(year(1945)).await;

        assert_eq!(source.list_years_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.year_record_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_per_call_ttl_override() {
        let (repository, source, _) = create_repository(source_1945(), Duration::from_secs(60));

        repository
            .year_record_with_ttl(year(1945), Duration::from_millis(20))
            .await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let record = repository.year_record(year(1945)).await.unwrap();
        assert_eq!(record.summary.as_deref(), Some("End of WWII"));
        assert_eq!(source.year_record_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_corrupted_cache_entry_is_a_miss() {
        let (repository, source, cache) = create_repository(source_1945(), Duration::from_secs(60));

        cache.set("years", b"not json", None).await.unwrap();

        let years = repository.available_years().await;
        assert_eq!(years, vec![year(1868), year(1945)]);
        assert_eq!(source.list_years_calls.load(Ordering::SeqCst), 1);

        // The bad entry was replaced
        repository.available_years().await;
        assert_eq!(source.list_years_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_months_for_year_is_month_ascending() {
        let (repository, _, _) = create_repository(source_1945(), Duration::from_secs(60));

        let records = repository.all_months_for_year(year(1945)).await;

        let months: Vec<Month> = records.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![month(3), month(8)]);
    }

    #[tokio::test]
    async fn test_all_months_skips_missing_records() {
        let mut source = source_1945();
        source.months.insert(year(1945), vec![month(3), month(5), month(8)]);
        let (repository, _, _) = create_repository(source, Duration::from_secs(60));

        let records = repository.all_months_for_year(year(1945)).await;

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_all_events_for_year_sorted_by_date() {
        let (repository, _, _) = create_repository(source_1945(), Duration::from_secs(60));

        let events = repository.all_events_for_year(year(1945)).await;

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["東京大空襲", "広島に原子爆弾投下", "玉音放送"]);
    }

    #[tokio::test]
    async fn test_all_events_for_unknown_year_is_empty() {
        let (repository, _, _) = create_repository(source_1945(), Duration::from_secs(60));

        assert!(repository.all_events_for_year(year(1868)).await.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_reads_reuse_cached_months() {
        let (repository, source, _) = create_repository(source_1945(), Duration::from_secs(60));

        repository.all_events_for_year(year(1945)).await;
        repository.all_events_for_year(year(1945)).await;

        assert_eq!(source.list_months_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.month_record_calls.load(Ordering::SeqCst), 2);
    }
}
