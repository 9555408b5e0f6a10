//! Pure derivations over yearly records.
//!
//! Every ratio here resolves a zero denominator to `0.0` so a dashboard
//! card degrades to a neutral value instead of failing the render pass.

use super::domain::{Category, YearlyRecord};
use serde::Serialize;

pub const DEFAULT_FLOOR_AREA_M2: f64 = 18_000.0;
pub const DEFAULT_LIFE_CYCLE_YEARS: u32 = 20;

/// Sum of the four category emissions before any offset, tCO₂e.
pub fn gross_emissions(record: &YearlyRecord) -> f64 {
    record.energy_emissions
        + record.water_emissions
        + record.waste_emissions
        + record.transport_emissions
}

/// Gross emissions less the renewable offset, floored at zero.
///
/// Offsets beyond gross emissions are not banked for later years.
pub fn net_emissions(record: &YearlyRecord) -> f64 {
    (gross_emissions(record) - record.renewable_offset).max(0.0)
}

/// kgCO₂e per m² per year. `floor_area_m2` must be positive.
pub fn carbon_intensity(net_tco2: f64, floor_area_m2: f64) -> f64 {
    net_tco2 * 1000.0 / floor_area_m2
}

/// Change from `baseline` to `current` where a reduction is positive.
pub fn percent_change(baseline: f64, current: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (baseline - current) / baseline * 100.0
}

/// Percentage of gross emissions cancelled by the renewable offset.
pub fn renewable_offset_share(record: &YearlyRecord) -> f64 {
    let gross = gross_emissions(record);
    if gross == 0.0 {
        return 0.0;
    }
    record.renewable_offset / gross * 100.0
}

/// Undiscounted projection: the current annual cost repeated for `years`.
pub fn life_cycle_cost(total_annual_cost: f64, years: u32) -> f64 {
    total_annual_cost * f64::from(years)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub label: &'static str,
    pub emissions: f64,
    pub share_of_gross: f64,
}

/// Gross emissions split by category, in display order.
pub fn emissions_breakdown(record: &YearlyRecord) -> Vec<CategoryShare> {
    let gross = gross_emissions(record);
    Category::ordered()
        .into_iter()
        .map(|category| {
            let emissions = category.emissions(record);
            let share_of_gross = if gross == 0.0 {
                0.0
            } else {
                emissions / gross * 100.0
            };
            CategoryShare {
                category,
                label: category.label(),
                emissions,
                share_of_gross,
            }
        })
        .collect()
}
