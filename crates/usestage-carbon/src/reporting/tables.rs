use super::domain::{Category, CostRate, MissingRateError, RateCard, YearlyRecord};
use super::metrics::{net_emissions, renewable_offset_share};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalRow {
    pub year: i32,
    pub energy_kwh: i64,
    pub energy_tco2e: f64,
    pub water_m3: i64,
    pub water_tco2e: f64,
    pub waste_kg: i64,
    pub waste_tco2e: f64,
    pub transport_pkm: i64,
    pub transport_tco2e: f64,
    pub renewable_offset_tco2e: f64,
    pub net_emissions_tco2e: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenewablesRow {
    pub year: i32,
    pub solar_pv_kwh: i64,
    pub solar_thermal_kwh: i64,
    pub total_renewables_kwh: i64,
    pub offset_tco2e: f64,
    pub offset_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRow {
    pub category: Category,
    pub label: &'static str,
    pub consumption: f64,
    pub unit: &'static str,
    pub unit_cost: f64,
    /// `"{rate:.3} {currency}"`, kept beside the raw rate for display.
    pub unit_cost_display: String,
    pub currency: String,
    pub annual_cost: f64,
    pub share_of_total_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostTable {
    pub rows: Vec<CostRow>,
    pub total_annual_cost: f64,
}

/// Whole display units; fractional parts are truncated.
fn whole_units(value: f64) -> i64 {
    value.trunc() as i64
}

fn sorted_by_year(records: &[YearlyRecord]) -> Vec<&YearlyRecord> {
    let mut ordered: Vec<&YearlyRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.year);
    ordered
}

/// One row per record, ascending by year.
pub fn build_historical_table(records: &[YearlyRecord]) -> Vec<HistoricalRow> {
    sorted_by_year(records)
        .into_iter()
        .map(|record| HistoricalRow {
            year: record.year,
            energy_kwh: whole_units(record.energy_consumption),
            energy_tco2e: record.energy_emissions,
            water_m3: whole_units(record.water_consumption),
            water_tco2e: record.water_emissions,
            waste_kg: whole_units(record.waste_consumption),
            waste_tco2e: record.waste_emissions,
            transport_pkm: whole_units(record.transport_consumption),
            transport_tco2e: record.transport_emissions,
            renewable_offset_tco2e: record.renewable_offset,
            net_emissions_tco2e: net_emissions(record),
        })
        .collect()
}

/// On-site generation and offset per year, ascending by year.
pub fn build_renewables_table(records: &[YearlyRecord]) -> Vec<RenewablesRow> {
    sorted_by_year(records)
        .into_iter()
        .map(|record| RenewablesRow {
            year: record.year,
            solar_pv_kwh: whole_units(record.solar_pv_kwh),
            solar_thermal_kwh: whole_units(record.solar_thermal_kwh),
            total_renewables_kwh: whole_units(record.solar_pv_kwh + record.solar_thermal_kwh),
            offset_tco2e: record.renewable_offset,
            offset_share_pct: renewable_offset_share(record),
        })
        .collect()
}

/// Annual operating cost per category for one year.
///
/// Every category must have a rate; the first one without fails the whole
/// table rather than producing a partial total.
pub fn build_cost_table(
    record: &YearlyRecord,
    rates: &[CostRate],
) -> Result<CostTable, MissingRateError> {
    let card = RateCard::from_rates(rates);
    let mut rows = Vec::with_capacity(Category::ordered().len());

    for category in Category::ordered() {
        let rate = card.rate(category)?;
        let consumption = category.consumption(record);
        rows.push(CostRow {
            category,
            label: category.label(),
            consumption,
            unit: category.unit(),
            unit_cost: rate.unit_cost,
            unit_cost_display: rate.display_rate(),
            currency: rate.currency.clone(),
            annual_cost: consumption * rate.unit_cost,
            share_of_total_pct: 0.0,
        });
    }

    let total_annual_cost: f64 = rows.iter().map(|row| row.annual_cost).sum();
    if total_annual_cost != 0.0 {
        for row in &mut rows {
            row.share_of_total_pct = row.annual_cost / total_annual_cost * 100.0;
        }
    }

    Ok(CostTable {
        rows,
        total_annual_cost,
    })
}
