//! Report language strings (English, Hindi)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    /// Parse "en", "english", "hi", "hindi" (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "hi" | "hindi" => Some(Language::Hindi),
            _ => None,
        }
    }

    pub fn strings(&self) -> &'static ReportStrings {
        match self {
            Language::English => &ENGLISH,
            Language::Hindi => &HINDI,
        }
    }
}

/// Fixed labels used when assembling a report
#[derive(Debug)]
pub struct ReportStrings {
    pub report_title: &'static str,
    pub details: &'static str,
    pub farmer_name: &'static str,
    pub location: &'static str,
    pub soil_type: &'static str,
    pub method: &'static str,
    pub generated: &'static str,
    pub weather: &'static str,
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub conditions: &'static str,
    pub advisories: &'static str,
    pub rain_alert: &'static str,
    pub clear_weather: &'static str,
    pub suitability: &'static str,
    pub match_word: &'static str,
    pub gaps: &'static str,
    pub below_requirement: &'static str,
    pub above_requirement: &'static str,
    pub matches_requirement: &'static str,
    pub not_scored: &'static str,
    pub schemes: &'static str,
}

static ENGLISH: ReportStrings = ReportStrings {
    report_title: "Smart Soil Report",
    details: "Report Details",
    farmer_name: "Farmer Name",
    location: "Location",
    soil_type: "Primary Soil Type",
    method: "Scoring Method",
    generated: "Generated",
    weather: "Live Weather Analytics",
    temperature: "Temperature",
    humidity: "Humidity",
    conditions: "Conditions",
    advisories: "Advisories",
    rain_alert: "It is likely to rain. DO NOT apply fertilizer today.",
    clear_weather: "Weather is clear for fertilizer application.",
    suitability: "Crop Suitability",
    match_word: "Match",
    gaps: "Largest Profile Gap",
    below_requirement: "below requirement",
    above_requirement: "above requirement",
    matches_requirement: "matches requirement",
    not_scored: "Not Scored",
    schemes: "Integrated Knowledge Hub",
};

static HINDI: ReportStrings = ReportStrings {
    report_title: "स्मार्ट मिट्टी रिपोर्ट",
    details: "रिपोर्ट विवरण",
    farmer_name: "किसान का नाम",
    location: "स्थान",
    soil_type: "मिट्टी का प्रकार",
    method: "मूल्यांकन विधि",
    generated: "तैयार किया गया",
    weather: "लाइव मौसम विश्लेषण",
    temperature: "तापमान",
    humidity: "आर्द्रता",
    conditions: "मौसम की स्थिति",
    advisories: "महत्वपूर्ण सूचना",
    rain_alert: "आज बारिश की संभावना है। कृपया आज उर्वरक (खाद) न डालें।",
    clear_weather: "मौसम उर्वरक डालने के लिए साफ़ है।",
    suitability: "फसल उपयुक्तता",
    match_word: "मेल",
    gaps: "सबसे बड़ा पोषक अंतर",
    below_requirement: "आवश्यकता से कम",
    above_requirement: "आवश्यकता से अधिक",
    matches_requirement: "आवश्यकता के अनुरूप",
    not_scored: "मूल्यांकन नहीं हुआ",
    schemes: "एकीकृत ज्ञान केंद्र",
};
