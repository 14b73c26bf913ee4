use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use nenpyo_core::history::{
    month_file_name, normalize_month, normalize_year, parse_document, parse_month_file_name,
    parse_year_dir_name, raw_event_count, validate_month_document, validate_year_document,
    year_file_name, Month, MonthRecord, ValidationReport, Year, YearRecord,
};
use nenpyo_core::storage::{HistorySource, Result, SourceError};

/// Content source backed by a directory of YAML files.
#[derive(Debug, Clone)]
pub struct FsHistorySource {
    root: PathBuf,
}

impl FsHistorySource {
    /// Creates a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn year_dir(&self, year: Year) -> PathBuf {
        self.root.join(year.to_string())
    }

    /// Lists directory entries, keeping those accepted by `select`.
    async fn scan_dir<T, F>(&self, dir: &Path, want_dirs: bool, select: F) -> Result<Vec<T>>
    where
        T: Ord,
        F: Fn(&str) -> Option<T>,
    {
        let mut entries = fs::read_dir(dir).await.map_err(|e| io_error(dir, &e))?;
        let mut found = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(dir, &e))? {
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(err) => {
                    tracing::debug!(
                        path = %entry.path().display(),
                        error = %err,
                        "Skipping unreadable entry"
                    );
                    continue;
                }
            };
            let wanted = if want_dirs {
                file_type.is_dir()
            } else {
                file_type.is_file()
            };
            if !wanted {
                continue;
            }

            let name = entry.file_name();
            if let Some(value) = name.to_str().and_then(&select) {
                found.push(value);
            }
        }

        found.sort();
        found.dedup();
        Ok(found)
    }
}

#[async_trait]
impl HistorySource for FsHistorySource {
    async fn list_years(&self) -> Result<Vec<Year>> {
        let years = self.scan_dir(&self.root, true, parse_year_dir_name).await?;
        tracing::debug!(count = years.len(), "Loaded available years");
        Ok(years)
    }

    async fn list_months(&self, year: Year) -> Result<Vec<Month>> {
        let dir = self.year_dir(year);
        let months = self.scan_dir(&dir, false, parse_month_file_name).await?;
        tracing::debug!(year = %year, count = months.len(), "Loaded available months");
        Ok(months)
    }

    async fn load_year_record(&self, year: Year) -> Result<Option<YearRecord>> {
        let path = self.year_dir(year).join(year_file_name(year));
        let Some(text) = read_optional(&path).await? else {
            tracing::trace!(year = %year, "No year file");
            return Ok(None);
        };

        let doc = parse_document(&text).map_err(|e| parse_error(&path, e))?;

        let report = validate_year_document(&doc, year);
        log_validation(&path, &report, "Year data validation failed");

        let record = normalize_year(&doc, year);
        match &record {
            Some(_) => tracing::debug!(year = %year, "Loaded year data"),
            None => tracing::warn!(path = %path.display(), "Year data is not a mapping"),
        }
        Ok(record)
    }

    async fn load_month_record(&self, year: Year, month: Month) -> Result<Option<MonthRecord>> {
        let path = self.year_dir(year).join(month_file_name(year, month));
        let Some(text) = read_optional(&path).await? else {
            tracing::trace!(year = %year, month = %month, "No month file");
            return Ok(None);
        };

        let doc = parse_document(&text).map_err(|e| parse_error(&path, e))?;

        let report = validate_month_document(&doc, year, month);
        log_validation(&path, &report, "Month data validation failed");

        let record = normalize_month(&doc, year, month);
        match &record {
            Some(record) => {
                let dropped = raw_event_count(&doc, "events").saturating_sub(record.events.len());
                tracing::debug!(
                    year = %year,
                    month = %month,
                    event_count = record.events.len(),
                    dropped,
                    "Loaded month data"
                );
            }
            None => tracing::warn!(path = %path.display(), "Month data is not a mapping"),
        }
        Ok(record)
    }
}

/// Reads a file, mapping "not found" to `None`.
async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(path, &err)),
    }
}

fn log_validation(path: &Path, report: &ValidationReport, message: &str) {
    if report.is_valid() {
        return;
    }
    tracing::warn!(path = %path.display(), issues = report.len(), "{message}");
    for issue in report.issues() {
        tracing::debug!(path = %path.display(), %issue, "Validation issue");
    }
}

fn io_error(path: &Path, err: &io::Error) -> SourceError {
    SourceError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> SourceError {
    SourceError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
