//! Read-only adapters over the three dashboard tables.
//!
//! Every adapter is an explicitly owned handle; nothing is cached between
//! fetches, so each render pass sees the latest stored rows.

mod csv_dir;
mod memory;
mod sqlite;
mod validate;

pub use csv_dir::CsvDirectorySource;
pub use memory::InMemorySource;
pub use sqlite::SqliteSource;

use crate::reporting::{Category, ComfortRecord, CostRate, Dataset, YearlyRecord};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read dashboard data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("database query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid {table} row: {reason}")]
    InvalidRecord { table: &'static str, reason: String },
    #[error("unsupported data source '{0}'; expected sqlite://<file>, csv://<directory>, or sample://")]
    UnsupportedUrl(String),
}

/// Supplies the yearly, comfort, and cost-rate collections in no particular order.
pub trait DataSource: Send + Sync {
    fn fetch_yearly(&self) -> Result<Vec<YearlyRecord>, SourceError>;
    fn fetch_comfort(&self) -> Result<Vec<ComfortRecord>, SourceError>;
    fn fetch_cost_rates(&self) -> Result<Vec<CostRate>, SourceError>;

    /// Human-readable location used in logs.
    fn describe(&self) -> String;

    /// Fetches all three collections and validates them once at the boundary.
    fn load_dataset(&self) -> Result<Dataset, SourceError> {
        let raw = Dataset {
            yearly: self.fetch_yearly()?,
            comfort: self.fetch_comfort()?,
            cost_rates: self.fetch_cost_rates()?,
        };
        checked(&self.describe(), raw)
    }
}

pub(crate) fn checked(source: &str, raw: Dataset) -> Result<Dataset, SourceError> {
    let dataset = validate::dataset(raw)?;

    debug!(
        source,
        yearly = dataset.yearly.len(),
        comfort = dataset.comfort.len(),
        cost_rates = dataset.cost_rates.len(),
        "loaded dashboard dataset"
    );

    Ok(dataset)
}

/// Picks an adapter from a connection string.
///
/// `sqlite://<file>` or a `.db`/`.sqlite`/`.sqlite3` path opens SQLite,
/// `csv://<dir>` or an existing directory reads CSV exports, and `sample://`
/// serves the built-in sample building.
pub fn open_source(url: &str) -> Result<Box<dyn DataSource>, SourceError> {
    let url = url.trim();

    if let Some(path) = url.strip_prefix("sqlite://") {
        return Ok(Box::new(SqliteSource::new(path)));
    }
    if let Some(dir) = url.strip_prefix("csv://") {
        return Ok(Box::new(CsvDirectorySource::new(dir)));
    }
    if url == "sample://" || url == "sample" {
        return Ok(Box::new(InMemorySource::sample()));
    }

    let path = Path::new(url);
    let is_sqlite_file = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "db" | "sqlite" | "sqlite3"));
    if is_sqlite_file {
        return Ok(Box::new(SqliteSource::new(path)));
    }
    if path.is_dir() {
        return Ok(Box::new(CsvDirectorySource::new(path)));
    }

    Err(SourceError::UnsupportedUrl(url.to_string()))
}

/// Turns raw `cost_rates` rows into rates, skipping categories the
/// dashboard never prices.
pub(crate) fn known_rates<I>(rows: I) -> Vec<CostRate>
where
    I: IntoIterator<Item = (String, f64, String)>,
{
    rows.into_iter()
        .filter_map(|(category, unit_cost, currency)| {
            match category.parse::<Category>() {
                Ok(category) => Some(CostRate {
                    category,
                    unit_cost,
                    currency,
                }),
                Err(err) => {
                    warn!(error = %err, "skipping cost_rates row");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_backend_from_url_scheme() {
        let sqlite = open_source("sqlite://data/dashboard.db").expect("sqlite url accepted");
        assert!(sqlite.describe().contains("dashboard.db"));

        let csv = open_source("csv://exports").expect("csv url accepted");
        assert!(csv.describe().contains("exports"));

        let bare = open_source("readings.sqlite").expect("sqlite extension accepted");
        assert!(bare.describe().starts_with("sqlite"));

        let sample = open_source("sample://").expect("sample accepted");
        assert!(!sample.load_dataset().expect("sample loads").yearly.is_empty());
    }

    #[test]
    fn rejects_unknown_schemes() {
        let err = open_source("postgresql://user@host/db")
            .err()
            .expect("postgres is not served by this build");
        assert!(matches!(err, SourceError::UnsupportedUrl(_)));
    }

    #[test]
    fn unknown_rate_categories_are_skipped() {
        let rates = known_rates([
            ("Energy".to_string(), 0.25, "€".to_string()),
            ("heating".to_string(), 0.08, "€".to_string()),
        ]);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].category, Category::Energy);
    }
}
