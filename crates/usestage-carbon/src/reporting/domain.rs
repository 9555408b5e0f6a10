use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One calendar year of building consumption, emissions, and on-site generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    /// kWh
    pub energy_consumption: f64,
    /// tCO₂e
    pub energy_emissions: f64,
    /// m³
    pub water_consumption: f64,
    pub water_emissions: f64,
    /// kg
    pub waste_consumption: f64,
    pub waste_emissions: f64,
    /// person-km
    pub transport_consumption: f64,
    pub transport_emissions: f64,
    pub solar_pv_kwh: f64,
    pub solar_thermal_kwh: f64,
    /// Carbon credited against gross emissions, tCO₂e.
    pub renewable_offset: f64,
}

/// Occupant comfort scores for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortRecord {
    pub year: i32,
    pub iaq_score: f64,
    /// Hours per year spent outside the thermal comfort band.
    pub thermal_hours: f64,
    pub lighting_score: f64,
    pub acoustic_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRate {
    pub category: Category,
    /// Currency per consumption unit of the category.
    pub unit_cost: f64,
    pub currency: String,
}

impl CostRate {
    pub fn display_rate(&self) -> String {
        format!("{:.3} {}", self.unit_cost, self.currency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Energy,
    Water,
    Waste,
    Transport,
}

impl Category {
    pub const fn ordered() -> [Self; 4] {
        [Self::Energy, Self::Water, Self::Waste, Self::Transport]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Water => "Water",
            Self::Waste => "Waste",
            Self::Transport => "Transport",
        }
    }

    /// Category name as stored in the `cost_rates` table.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Water => "water",
            Self::Waste => "waste",
            Self::Transport => "transport",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Energy => "kWh",
            Self::Water => "m³",
            Self::Waste => "kg",
            Self::Transport => "pkm",
        }
    }

    pub fn consumption(self, record: &YearlyRecord) -> f64 {
        match self {
            Self::Energy => record.energy_consumption,
            Self::Water => record.water_consumption,
            Self::Waste => record.waste_consumption,
            Self::Transport => record.transport_consumption,
        }
    }

    pub fn emissions(self, record: &YearlyRecord) -> f64 {
        match self {
            Self::Energy => record.energy_emissions,
            Self::Water => record.water_emissions,
            Self::Waste => record.waste_emissions,
            Self::Transport => record.transport_emissions,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == normalized)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Topic pages offered by the dashboard sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Overview,
    Energy,
    Water,
    Waste,
    Transport,
    Comfort,
    Cost,
}

impl Section {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Overview,
            Self::Energy,
            Self::Water,
            Self::Waste,
            Self::Transport,
            Self::Comfort,
            Self::Cost,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Energy => "Energy",
            Self::Water => "Water",
            Self::Waste => "Waste",
            Self::Transport => "Transport",
            Self::Comfort => "Comfort",
            Self::Cost => "Cost",
        }
    }

    /// The consumption category a section reports on, if any.
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Energy => Some(Category::Energy),
            Self::Water => Some(Category::Water),
            Self::Waste => Some(Category::Waste),
            Self::Transport => Some(Category::Transport),
            Self::Overview | Self::Comfort | Self::Cost => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section '{0}'")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|section| section.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSection(value.to_string()))
    }
}

/// A required consumption category has no configured unit cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no cost rate configured for the {category} category")]
pub struct MissingRateError {
    pub category: Category,
}

/// Unit costs indexed by the closed set of categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateCard {
    energy: Option<CostRate>,
    water: Option<CostRate>,
    waste: Option<CostRate>,
    transport: Option<CostRate>,
}

impl RateCard {
    /// Later rates for the same category replace earlier ones; sources reject
    /// duplicates before this point.
    pub fn from_rates<'a, I>(rates: I) -> Self
    where
        I: IntoIterator<Item = &'a CostRate>,
    {
        let mut card = Self::default();
        for rate in rates {
            *card.slot_mut(rate.category) = Some(rate.clone());
        }
        card
    }

    pub fn rate(&self, category: Category) -> Result<&CostRate, MissingRateError> {
        self.slot(category)
            .as_ref()
            .ok_or(MissingRateError { category })
    }

    fn slot(&self, category: Category) -> &Option<CostRate> {
        match category {
            Category::Energy => &self.energy,
            Category::Water => &self.water,
            Category::Waste => &self.waste,
            Category::Transport => &self.transport,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<CostRate> {
        match category {
            Category::Energy => &mut self.energy,
            Category::Water => &mut self.water,
            Category::Waste => &mut self.waste,
            Category::Transport => &mut self.transport,
        }
    }
}
