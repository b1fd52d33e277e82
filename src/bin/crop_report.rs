//! Crop suitability report for one soil profile
//!
//! Usage: SOIL=Black FARMER="Sita Devi" LOCATION=Patna WEATHER="light rain" \
//!        cargo run --bin crop_report
//!
//! Environment:
//!   CROP_CONFIG   JSON scoring config (built-in presets when unset; its
//!                 schemes_path adds the knowledge hub section)
//!   SOIL          Named soil profile from the config (default: Alluvial)
//!   SOIL_PROFILE  Comma-separated attribute values; overrides SOIL
//!   FARMER, LOCATION
//!   WEATHER       Weather description, e.g. "light rain"
//!   TEMPERATURE_C, HUMIDITY_PCT
//!   LANGUAGE      en | hi (default: en)
//!   FORMAT        markdown | json | html (default: markdown)

use anyhow::{Context, Result};
use crop_suitability::{
    classify_weather, AttributeVector, HtmlFormatter, JsonFormatter, Language, MarkdownFormatter,
    ReportAssembler, ReportMetadata, ResolvedConfig, ScoringConfig, SoilProfile, WeatherSummary,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_suitability=info,crop_report=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match std::env::var("CROP_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading scoring config from {}", path);
            ScoringConfig::load(&PathBuf::from(path))?
        }
        Err(_) => {
            tracing::info!("CROP_CONFIG not set - using built-in presets");
            ScoringConfig::default()
        }
    };
    let resolved = config.resolve()?;

    let store = resolved.build_store()?;
    let engine = resolved.build_engine();
    let metric = resolved.build_metric()?;

    tracing::info!(
        "Catalog: {} crops, metric: {}",
        resolved.catalog.len(),
        metric.name()
    );

    let soil = select_soil(&resolved)?;
    tracing::info!("Scoring soil '{}' {}", soil.name, soil.profile);

    let report = engine
        .score_with_metric(&soil.profile, &store, metric.as_ref())
        .with_context(|| format!("Failed to score soil '{}'", soil.name))?;

    let weather = std::env::var("WEATHER").ok().map(|description| WeatherSummary {
        temperature_c: env_f64("TEMPERATURE_C").unwrap_or(f64::NAN),
        humidity_pct: env_f64("HUMIDITY_PCT").unwrap_or(f64::NAN),
        description,
    });
    let advisories = weather
        .iter()
        .map(|w| classify_weather(&w.description))
        .collect();

    let language = std::env::var("LANGUAGE")
        .ok()
        .and_then(|code| Language::from_code(&code))
        .unwrap_or_default();

    let metadata = ReportMetadata {
        subject_name: std::env::var("FARMER").unwrap_or_default(),
        location: std::env::var("LOCATION").unwrap_or_default(),
        soil_name: Some(soil.name.clone()),
        language,
        attribute_names: resolved.attributes.clone(),
        advisories,
        weather: weather.filter(|w| w.temperature_c.is_finite() && w.humidity_pct.is_finite()),
        schemes: resolved.schemes.clone(),
    };

    let rendered = ReportAssembler::assemble(&report, &metadata);

    let format = std::env::var("FORMAT").unwrap_or_else(|_| "markdown".to_string());
    let output = match format.as_str() {
        "json" => JsonFormatter::format(&rendered).context("Failed to serialize report")?,
        "html" => HtmlFormatter::format(&rendered).context("Failed to render HTML report")?,
        "markdown" | "md" => MarkdownFormatter::format(&rendered),
        other => anyhow::bail!("Unknown FORMAT '{}' (expected markdown, json or html)", other),
    };

    println!("{}", output);
    Ok(())
}

/// Soil from SOIL_PROFILE, else the SOIL preset name
fn select_soil(resolved: &ResolvedConfig) -> Result<SoilProfile> {
    if let Ok(raw) = std::env::var("SOIL_PROFILE") {
        let values = raw
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .with_context(|| format!("SOIL_PROFILE is not a list of numbers: '{}'", raw))?;
        let profile = AttributeVector::new(values)
            .with_context(|| format!("SOIL_PROFILE is not a valid attribute vector: '{}'", raw))?;
        return Ok(SoilProfile {
            name: "Custom".to_string(),
            profile,
        });
    }

    let name = std::env::var("SOIL").unwrap_or_else(|_| "Alluvial".to_string());
    resolved
        .soil(&name)
        .cloned()
        .with_context(|| {
            let known: Vec<&str> = resolved.soils.iter().map(|s| s.name.as_str()).collect();
            format!("Unknown soil '{}' (known: {})", name, known.join(", "))
        })
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
