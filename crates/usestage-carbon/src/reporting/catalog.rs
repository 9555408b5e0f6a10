use super::domain::Section;
use serde::Serialize;

/// A meter, survey, or sensor feeding the yearly figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataSourceEntry {
    pub name: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
    pub coverage: &'static str,
}

const ENTRIES: [DataSourceEntry; 6] = [
    DataSourceEntry {
        name: "Grid electricity main meter",
        category: "Energy",
        unit: "kWh",
        coverage: "Whole building",
    },
    DataSourceEntry {
        name: "Natural gas boiler",
        category: "Energy",
        unit: "m³",
        coverage: "Heating only",
    },
    DataSourceEntry {
        name: "Potable water main",
        category: "Water",
        unit: "m³",
        coverage: "Whole building",
    },
    DataSourceEntry {
        name: "Mixed non-hazardous waste",
        category: "Waste",
        unit: "kg",
        coverage: "Building",
    },
    DataSourceEntry {
        name: "Staff commuting survey",
        category: "Transport",
        unit: "pkm",
        coverage: "72% staff",
    },
    DataSourceEntry {
        name: "Comfort monitoring (IAQ & thermal)",
        category: "Comfort",
        unit: "sensors",
        coverage: "Offices & hangar",
    },
];

pub fn all() -> &'static [DataSourceEntry] {
    &ENTRIES
}

/// Overview lists everything; other sections list their own sources.
pub fn for_section(section: Section) -> Vec<DataSourceEntry> {
    match section {
        Section::Overview => all().to_vec(),
        other => all()
            .iter()
            .filter(|entry| entry.category.eq_ignore_ascii_case(other.label()))
            .copied()
            .collect(),
    }
}
