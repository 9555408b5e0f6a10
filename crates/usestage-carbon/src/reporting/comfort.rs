use super::domain::ComfortRecord;
use serde::Serialize;

const GOOD_IAQ_SCORE: f64 = 85.0;
const THERMAL_HOURS_TARGET: f64 = 150.0;
const GOOD_LIGHTING_SCORE: f64 = 80.0;
const GOOD_ACOUSTIC_SCORE: f64 = 80.0;

pub const COMFORT_SCALE_NOTE: &str = "Comfort indicators are dimensionless scores on a 0–100 scale, \
aggregated from underlying physical measurements (CO₂, PM₂.₅, noise levels, illuminance, etc.).";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortIndicatorView {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortIndicators {
    pub year: i32,
    pub indoor_air_quality: ComfortIndicatorView,
    pub thermal_discomfort: ComfortIndicatorView,
    pub lighting: ComfortIndicatorView,
    pub acoustics: ComfortIndicatorView,
    pub note: &'static str,
}

impl ComfortIndicators {
    pub fn from_record(record: &ComfortRecord) -> Self {
        Self {
            year: record.year,
            indoor_air_quality: ComfortIndicatorView {
                label: "Indoor air quality index",
                value: record.iaq_score,
                unit: "/100",
                assessment: (record.iaq_score >= GOOD_IAQ_SCORE).then_some("Good IAQ"),
            },
            thermal_discomfort: ComfortIndicatorView {
                label: "Time outside thermal comfort",
                value: record.thermal_hours,
                unit: "hours/yr",
                assessment: Some(if record.thermal_hours <= THERMAL_HOURS_TARGET {
                    "Within comfort targets"
                } else {
                    "Above target"
                }),
            },
            lighting: ComfortIndicatorView {
                label: "Lighting & visual comfort",
                value: record.lighting_score,
                unit: "/100",
                assessment: (record.lighting_score >= GOOD_LIGHTING_SCORE)
                    .then_some("Good daylight & glare control"),
            },
            acoustics: ComfortIndicatorView {
                label: "Acoustics & noise protection",
                value: record.acoustic_score,
                unit: "/100",
                assessment: Some(if record.acoustic_score >= GOOD_ACOUSTIC_SCORE {
                    "Good"
                } else {
                    "Consider noise mitigation"
                }),
            },
            note: COMFORT_SCALE_NOTE,
        }
    }

    pub fn indicators(&self) -> [&ComfortIndicatorView; 4] {
        [
            &self.indoor_air_quality,
            &self.thermal_discomfort,
            &self.lighting,
            &self.acoustics,
        ]
    }
}
