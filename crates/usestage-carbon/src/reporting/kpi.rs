use super::domain::YearlyRecord;
use super::metrics::{carbon_intensity, net_emissions, percent_change, renewable_offset_share};
use serde::Serialize;

/// Change against the baseline year; positive means an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiDelta {
    pub percent: f64,
    pub baseline_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<KpiDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The headline cards shown above every section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub net_operational_carbon: KpiCard,
    pub energy_consumption: KpiCard,
    pub carbon_intensity: KpiCard,
    pub renewables_offset: KpiCard,
}

impl KpiSummary {
    pub fn compute(current: &YearlyRecord, baseline: &YearlyRecord, floor_area_m2: f64) -> Self {
        let baseline_year = baseline.year;
        let delta = |from: f64, to: f64| {
            Some(KpiDelta {
                percent: percent_change(from, to),
                baseline_year,
            })
        };

        let net = net_emissions(current);
        let baseline_net = net_emissions(baseline);
        let intensity = carbon_intensity(net, floor_area_m2);
        let baseline_intensity = carbon_intensity(baseline_net, floor_area_m2);
        let offset_share = renewable_offset_share(current);

        Self {
            net_operational_carbon: KpiCard {
                label: "Net operational carbon",
                value: net,
                unit: "tCO₂e/yr",
                delta: delta(baseline_net, net),
                note: None,
            },
            energy_consumption: KpiCard {
                label: "Energy consumption",
                value: current.energy_consumption,
                unit: "kWh/yr",
                delta: delta(baseline.energy_consumption, current.energy_consumption),
                note: None,
            },
            carbon_intensity: KpiCard {
                label: "Carbon intensity (net)",
                value: intensity,
                unit: "kgCO₂e/m²·yr",
                delta: delta(baseline_intensity, intensity),
                note: None,
            },
            renewables_offset: KpiCard {
                label: "Renewables offset",
                value: current.renewable_offset,
                unit: "tCO₂e/yr",
                delta: None,
                note: Some(format!("{offset_share:.1}% of gross emissions")),
            },
        }
    }

    pub fn cards(&self) -> [&KpiCard; 4] {
        [
            &self.net_operational_carbon,
            &self.energy_consumption,
            &self.carbon_intensity,
            &self.renewables_offset,
        ]
    }
}
