//! Boundary checks applied once per fetch.
//!
//! Yearly rows feed every section, so a bad one rejects the dataset. Comfort
//! and cost-rate rows only feed their own section: a bad row is dropped and
//! logged, and the section that needed it reports the gap when rendered.

use super::SourceError;
use crate::reporting::{ComfortRecord, CostRate, Dataset, YearlyRecord};
use std::collections::HashSet;
use tracing::warn;

pub(super) fn dataset(dataset: Dataset) -> Result<Dataset, SourceError> {
    yearly(&dataset.yearly)
        .inspect_err(|err| warn!(error = %err, "rejected dashboard dataset"))?;

    Ok(Dataset {
        yearly: dataset.yearly,
        comfort: comfort(dataset.comfort),
        cost_rates: cost_rates(dataset.cost_rates),
    })
}

fn invalid(table: &'static str, reason: String) -> SourceError {
    SourceError::InvalidRecord { table, reason }
}

fn yearly(records: &[YearlyRecord]) -> Result<(), SourceError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.year) {
            return Err(invalid(
                "yearly_data",
                format!("year {} appears more than once", record.year),
            ));
        }

        let fields = [
            ("energy_consumption", record.energy_consumption),
            ("energy_emissions", record.energy_emissions),
            ("water_consumption", record.water_consumption),
            ("water_emissions", record.water_emissions),
            ("waste_consumption", record.waste_consumption),
            ("waste_emissions", record.waste_emissions),
            ("transport_consumption", record.transport_consumption),
            ("transport_emissions", record.transport_emissions),
            ("solar_pv_kwh", record.solar_pv_kwh),
            ("solar_thermal_kwh", record.solar_thermal_kwh),
            ("renewable_offset", record.renewable_offset),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(
                    "yearly_data",
                    format!("{name} for {} must be non-negative, got {value}", record.year),
                ));
            }
        }
    }
    Ok(())
}

fn comfort_defect(record: &ComfortRecord) -> Option<String> {
    let scores = [
        ("iaq_score", record.iaq_score),
        ("lighting_score", record.lighting_score),
        ("acoustic_score", record.acoustic_score),
    ];
    for (name, value) in scores {
        if !(0.0..=100.0).contains(&value) {
            return Some(format!("{name} must be within 0-100, got {value}"));
        }
    }

    if !record.thermal_hours.is_finite() || record.thermal_hours < 0.0 {
        return Some(format!(
            "thermal_hours must be non-negative, got {}",
            record.thermal_hours
        ));
    }
    None
}

/// Keeps the first well-formed row per year.
fn comfort(records: Vec<ComfortRecord>) -> Vec<ComfortRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            if let Some(reason) = comfort_defect(record) {
                warn!(year = record.year, %reason, "skipping comfort_data row");
                return false;
            }
            if !seen.insert(record.year) {
                warn!(year = record.year, "skipping repeated comfort_data year");
                return false;
            }
            true
        })
        .collect()
}

/// Keeps the first non-negative rate per category.
fn cost_rates(rates: Vec<CostRate>) -> Vec<CostRate> {
    let mut seen = HashSet::new();
    rates
        .into_iter()
        .filter(|rate| {
            if !rate.unit_cost.is_finite() || rate.unit_cost < 0.0 {
                warn!(
                    category = %rate.category,
                    unit_cost = rate.unit_cost,
                    "skipping cost_rates row with negative unit cost"
                );
                return false;
            }
            if !seen.insert(rate.category) {
                warn!(category = %rate.category, "skipping repeated cost_rates category");
                return false;
            }
            true
        })
        .collect()
}
