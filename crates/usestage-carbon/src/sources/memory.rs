use super::{DataSource, SourceError};
use crate::reporting::{Category, ComfortRecord, CostRate, Dataset, YearlyRecord};

/// Serves a fixed dataset, for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: Dataset,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Five reporting years of a mid-size office and hangar building.
    pub fn sample() -> Self {
        #[rustfmt::skip]
        let yearly = vec![
            yearly(2020, 1_450_000.0, 290.0, 9_800.0, 3.4, 62_000.0, 28.5, 410_000.0, 61.0, 95_000.0, 22_000.0, 19.0),
            yearly(2021, 1_390_000.0, 272.5, 9_450.0, 3.3, 58_500.0, 26.9, 365_000.0, 54.2, 118_000.0, 24_500.0, 23.6),
            yearly(2022, 1_320_000.0, 251.0, 9_100.0, 3.1, 55_200.0, 25.1, 352_000.0, 52.3, 142_000.0, 26_800.0, 28.4),
            yearly(2023, 1_255_000.0, 231.8, 8_870.0, 3.0, 51_900.0, 23.6, 331_000.0, 49.0, 171_000.0, 29_300.0, 34.2),
            yearly(2024, 1_180_000.0, 209.4, 8_640.0, 2.9, 48_300.0, 21.8, 318_000.0, 47.1, 198_500.0, 31_200.0, 39.7),
        ];

        let comfort = vec![
            comfort(2020, 78.0, 212.0, 74.0, 71.0),
            comfort(2021, 81.0, 188.0, 77.0, 73.0),
            comfort(2022, 84.0, 164.0, 79.0, 76.0),
            comfort(2023, 86.0, 149.0, 82.0, 79.0),
            comfort(2024, 88.0, 131.0, 84.0, 81.0),
        ];

        let cost_rates = vec![
            rate(Category::Energy, 0.25),
            rate(Category::Water, 3.0),
            rate(Category::Waste, 0.1),
            rate(Category::Transport, 0.05),
        ];

        Self::new(Dataset {
            yearly,
            comfort,
            cost_rates,
        })
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

impl DataSource for InMemorySource {
    fn fetch_yearly(&self) -> Result<Vec<YearlyRecord>, SourceError> {
        Ok(self.dataset.yearly.clone())
    }

    fn fetch_comfort(&self) -> Result<Vec<ComfortRecord>, SourceError> {
        Ok(self.dataset.comfort.clone())
    }

    fn fetch_cost_rates(&self) -> Result<Vec<CostRate>, SourceError> {
        Ok(self.dataset.cost_rates.clone())
    }

    fn describe(&self) -> String {
        "memory://".to_string()
    }
}

#[allow(clippy::too_many_arguments)]
fn yearly(
    year: i32,
    energy_consumption: f64,
    energy_emissions: f64,
    water_consumption: f64,
    water_emissions: f64,
    waste_consumption: f64,
    waste_emissions: f64,
    transport_consumption: f64,
    transport_emissions: f64,
    solar_pv_kwh: f64,
    solar_thermal_kwh: f64,
    renewable_offset: f64,
) -> YearlyRecord {
    YearlyRecord {
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
        renewable_offset,
    }
}

fn comfort(
    year: i32,
    iaq_score: f64,
    thermal_hours: f64,
    lighting_score: f64,
    acoustic_score: f64,
) -> ComfortRecord {
    ComfortRecord {
        year,
        iaq_score,
        thermal_hours,
        lighting_score,
        acoustic_score,
    }
}

fn rate(category: Category, unit_cost: f64) -> CostRate {
    CostRate {
        category,
        unit_cost,
        currency: "€".to_string(),
    }
}
