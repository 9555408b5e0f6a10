use super::catalog::{self, DataSourceEntry};
use super::comfort::ComfortIndicators;
use super::domain::{Category, ComfortRecord, CostRate, MissingRateError, Section, YearlyRecord};
use super::kpi::KpiSummary;
use super::metrics::{emissions_breakdown, gross_emissions, life_cycle_cost, CategoryShare};
use super::tables::{
    build_cost_table, build_historical_table, build_renewables_table, CostTable, HistoricalRow,
    RenewablesRow,
};
use crate::config::BuildingConfig;
use serde::Serialize;
use tracing::debug;

/// One fetch worth of records. Nothing in it is mutated after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub yearly: Vec<YearlyRecord>,
    pub comfort: Vec<ComfortRecord>,
    pub cost_rates: Vec<CostRate>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    #[error("no data found in yearly_data table")]
    DataUnavailable,
    #[error("no yearly readings recorded for {year}")]
    UnknownYear { year: i32 },
    #[error("no comfort readings recorded for {year}")]
    ComfortUnavailable { year: i32 },
    #[error(transparent)]
    MissingRate(#[from] MissingRateError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailMetric {
    pub metric: &'static str,
    pub value: f64,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeCycleCost {
    pub years: u32,
    pub total: f64,
    /// Set when every rate shares one currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Overview {
        historical: Vec<HistoricalRow>,
    },
    Energy {
        details: Vec<DetailMetric>,
        renewables: Vec<RenewablesRow>,
    },
    Category {
        category: Category,
        details: Vec<DetailMetric>,
    },
    Comfort {
        indicators: ComfortIndicators,
    },
    Cost {
        table: CostTable,
        life_cycle: LifeCycleCost,
    },
}

/// Everything one page of the dashboard shows for a section and year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub section: Section,
    pub section_label: &'static str,
    pub year: i32,
    pub baseline_year: i32,
    pub available_years: Vec<i32>,
    pub kpis: KpiSummary,
    pub gross_emissions_tco2e: f64,
    pub emissions_by_category: Vec<CategoryShare>,
    pub body: SectionBody,
    pub data_sources: Vec<DataSourceEntry>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    building: BuildingConfig,
}

impl Dashboard {
    pub fn new(dataset: Dataset, building: BuildingConfig) -> Result<Self, DashboardError> {
        if dataset.yearly.is_empty() {
            return Err(DashboardError::DataUnavailable);
        }
        Ok(Self { dataset, building })
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.dataset.yearly.iter().map(|r| r.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    pub fn latest_year(&self) -> i32 {
        self.dataset
            .yearly
            .iter()
            .map(|record| record.year)
            .max()
            .unwrap_or_default()
    }

    pub fn baseline_year(&self) -> i32 {
        self.dataset
            .yearly
            .iter()
            .map(|record| record.year)
            .min()
            .unwrap_or_default()
    }

    pub fn record(&self, year: i32) -> Result<&YearlyRecord, DashboardError> {
        self.dataset
            .yearly
            .iter()
            .find(|record| record.year == year)
            .ok_or(DashboardError::UnknownYear { year })
    }

    pub fn historical_table(&self) -> Vec<HistoricalRow> {
        build_historical_table(&self.dataset.yearly)
    }

    pub fn renewables_table(&self) -> Vec<RenewablesRow> {
        build_renewables_table(&self.dataset.yearly)
    }

    pub fn cost_table(&self, year: i32) -> Result<CostTable, DashboardError> {
        let record = self.record(year)?;
        Ok(build_cost_table(record, &self.dataset.cost_rates)?)
    }

    pub fn life_cycle(&self, table: &CostTable) -> LifeCycleCost {
        let years = self.building.life_cycle_years;
        let mut currencies = table.rows.iter().map(|row| row.currency.as_str());
        let first = currencies.next();
        let currency = first
            .filter(|first| currencies.all(|other| other == *first))
            .map(str::to_string);

        LifeCycleCost {
            years,
            total: life_cycle_cost(table.total_annual_cost, years),
            currency,
            note: format!(
                "Life cycle cost ({years} years, no discounting): \
                 current annual cost multiplied by {years}."
            ),
        }
    }

    /// Builds one page. `year` defaults to the most recent reporting year.
    pub fn render(
        &self,
        section: Section,
        year: Option<i32>,
    ) -> Result<DashboardView, DashboardError> {
        let year = year.unwrap_or_else(|| self.latest_year());
        let baseline_year = self.baseline_year();
        let current = self.record(year)?;
        let baseline = self.record(baseline_year)?;

        debug!(
            section = section.label(),
            year,
            baseline_year,
            "rendering dashboard section"
        );

        let body = match section {
            Section::Overview => SectionBody::Overview {
                historical: self.historical_table(),
            },
            Section::Energy => SectionBody::Energy {
                details: vec![
                    DetailMetric {
                        metric: "Consumption",
                        value: current.energy_consumption,
                        units: "kWh/yr".to_string(),
                    },
                    DetailMetric {
                        metric: "Emissions",
                        value: current.energy_emissions,
                        units: "tCO₂e/yr".to_string(),
                    },
                    DetailMetric {
                        metric: "Renewable offset",
                        value: current.renewable_offset,
                        units: "tCO₂e/yr".to_string(),
                    },
                ],
                renewables: self.renewables_table(),
            },
            Section::Water => category_body(Category::Water, current),
            Section::Waste => category_body(Category::Waste, current),
            Section::Transport => category_body(Category::Transport, current),
            Section::Comfort => {
                let record = self
                    .dataset
                    .comfort
                    .iter()
                    .find(|record| record.year == year)
                    .ok_or(DashboardError::ComfortUnavailable { year })?;
                SectionBody::Comfort {
                    indicators: ComfortIndicators::from_record(record),
                }
            }
            Section::Cost => {
                let table = build_cost_table(current, &self.dataset.cost_rates)?;
                let life_cycle = self.life_cycle(&table);
                SectionBody::Cost { table, life_cycle }
            }
        };

        Ok(DashboardView {
            section,
            section_label: section.label(),
            year,
            baseline_year,
            available_years: self.years(),
            kpis: KpiSummary::compute(current, baseline, self.building.floor_area_m2),
            gross_emissions_tco2e: gross_emissions(current),
            emissions_by_category: emissions_breakdown(current),
            body,
            data_sources: catalog::for_section(section),
        })
    }
}

fn category_body(category: Category, record: &YearlyRecord) -> SectionBody {
    SectionBody::Category {
        category,
        details: vec![
            DetailMetric {
                metric: "Consumption",
                value: category.consumption(record),
                units: format!("{}/yr", category.unit()),
            },
            DetailMetric {
                metric: "Emissions",
                value: category.emissions(record),
                units: "tCO₂e/yr".to_string(),
            },
        ],
    }
}
