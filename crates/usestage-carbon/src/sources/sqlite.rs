use super::{checked, known_rates, DataSource, SourceError};
use crate::reporting::{ComfortRecord, CostRate, Dataset, YearlyRecord};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

const YEARLY_QUERY: &str = "
    SELECT
        year,
        energy_consumption,
        energy_emissions,
        water_consumption,
        water_emissions,
        waste_consumption,
        waste_emissions,
        transport_consumption,
        transport_emissions,
        solar_pv_kwh,
        solar_thermal_kwh,
        renewable_offset
    FROM yearly_data
    ORDER BY year DESC";

const COMFORT_QUERY: &str = "
    SELECT
        year,
        iaq_score,
        thermal_hours,
        lighting_score,
        acoustic_score
    FROM comfort_data
    ORDER BY year DESC";

const COST_RATES_QUERY: &str = "SELECT category, unit_cost, currency FROM cost_rates";

/// Read-only access to a SQLite file holding the dashboard tables.
///
/// `load_dataset` reads all three tables over one connection inside a single
/// read transaction; the individual fetches open their own connection.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> Result<Connection, SourceError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA query_only=ON;")?;
        Ok(conn)
    }
}

fn query_yearly(conn: &Connection) -> Result<Vec<YearlyRecord>, SourceError> {
    let mut stmt = conn.prepare(YEARLY_QUERY)?;
    let rows = stmt.query_map([], |row| {
        Ok(YearlyRecord {
            year: row.get(0)?,
            energy_consumption: row.get(1)?,
            energy_emissions: row.get(2)?,
            water_consumption: row.get(3)?,
            water_emissions: row.get(4)?,
            waste_consumption: row.get(5)?,
            waste_emissions: row.get(6)?,
            transport_consumption: row.get(7)?,
            transport_emissions: row.get(8)?,
            solar_pv_kwh: row.get(9)?,
            solar_thermal_kwh: row.get(10)?,
            renewable_offset: row.get(11)?,
        })
    })?;
    let records = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn query_comfort(conn: &Connection) -> Result<Vec<ComfortRecord>, SourceError> {
    let mut stmt = conn.prepare(COMFORT_QUERY)?;
    let rows = stmt.query_map([], |row| {
        Ok(ComfortRecord {
            year: row.get(0)?,
            iaq_score: row.get(1)?,
            thermal_hours: row.get(2)?,
            lighting_score: row.get(3)?,
            acoustic_score: row.get(4)?,
        })
    })?;
    let records = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn query_cost_rates(conn: &Connection) -> Result<Vec<CostRate>, SourceError> {
    let mut stmt = conn.prepare(COST_RATES_QUERY)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<Vec<(String, f64, String)>, _>>()?;
    Ok(known_rates(rows))
}

impl DataSource for SqliteSource {
    fn fetch_yearly(&self) -> Result<Vec<YearlyRecord>, SourceError> {
        query_yearly(&self.connect()?)
    }

    fn fetch_comfort(&self) -> Result<Vec<ComfortRecord>, SourceError> {
        query_comfort(&self.connect()?)
    }

    fn fetch_cost_rates(&self) -> Result<Vec<CostRate>, SourceError> {
        query_cost_rates(&self.connect()?)
    }

    fn describe(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }

    fn load_dataset(&self) -> Result<Dataset, SourceError> {
        let conn = self.connect()?;
        let snapshot = conn.unchecked_transaction()?;
        let raw = Dataset {
            yearly: query_yearly(&snapshot)?,
            comfort: query_comfort(&snapshot)?,
            cost_rates: query_cost_rates(&snapshot)?,
        };
        snapshot.finish()?;
        checked(&self.describe(), raw)
    }
}
