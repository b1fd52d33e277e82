//! Weather Advisories
//!
//! Turns the weather collaborator's condition text into advisory flags that
//! travel beside the suitability scores. Flags never feed into a score.

use serde::{Deserialize, Serialize};

/// Condition keywords that mean fertilizer would be washed out
const PRECIPITATION_KEYWORDS: [&str; 2] = ["rain", "drizzle"];

/// Advice attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryFlag {
    /// Rain is likely; do not apply fertilizer today
    PrecipitationImminent,
    /// Weather is clear for fertilizer application
    ClearForFertilizer,
}

impl AdvisoryFlag {
    /// Stable identifier used as the row key in rendered reports
    pub fn code(&self) -> &'static str {
        match self {
            AdvisoryFlag::PrecipitationImminent => "precipitation_imminent",
            AdvisoryFlag::ClearForFertilizer => "clear_for_fertilizer",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AdvisoryFlag::PrecipitationImminent => "⚠️",
            AdvisoryFlag::ClearForFertilizer => "✅",
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, AdvisoryFlag::PrecipitationImminent)
    }
}

/// Current conditions as reported by the weather collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub description: String,
}

impl WeatherSummary {
    pub fn advisory(&self) -> AdvisoryFlag {
        classify_weather(&self.description)
    }
}

/// Classify a free-text weather description ("light rain", "clear sky")
pub fn classify_weather(description: &str) -> AdvisoryFlag {
    let lower = description.to_lowercase();
    if PRECIPITATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        AdvisoryFlag::PrecipitationImminent
    } else {
        AdvisoryFlag::ClearForFertilizer
    }
}
