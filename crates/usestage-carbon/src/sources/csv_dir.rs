use super::{known_rates, DataSource, SourceError};
use crate::reporting::{ComfortRecord, CostRate, YearlyRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const YEARLY_FILE: &str = "yearly_data.csv";
pub const COMFORT_FILE: &str = "comfort_data.csv";
pub const COST_RATES_FILE: &str = "cost_rates.csv";

/// Reads table exports named after the database tables from one directory.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn read_table<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, SourceError> {
        let file = File::open(self.dir.join(file_name))?;
        parse_rows(file, file_name)
    }
}

impl DataSource for CsvDirectorySource {
    fn fetch_yearly(&self) -> Result<Vec<YearlyRecord>, SourceError> {
        self.read_table(YEARLY_FILE)
    }

    fn fetch_comfort(&self) -> Result<Vec<ComfortRecord>, SourceError> {
        self.read_table(COMFORT_FILE)
    }

    fn fetch_cost_rates(&self) -> Result<Vec<CostRate>, SourceError> {
        let rows = self.read_table::<CostRateRow>(COST_RATES_FILE)?;
        Ok(known_rates(
            rows.into_iter()
                .map(|row| (row.category, row.unit_cost, row.currency)),
        ))
    }

    fn describe(&self) -> String {
        format!("csv://{}", self.dir.display())
    }
}

pub(crate) fn parse_rows<T, R>(reader: R, file_name: &str) -> Result<Vec<T>, SourceError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| SourceError::Csv {
            file: file_name.to_string(),
            source,
        })
}

#[derive(Debug, Deserialize)]
struct CostRateRow {
    category: String,
    unit_cost: f64,
    currency: String,
}
