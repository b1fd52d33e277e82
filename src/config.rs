//! Scoring Configuration
//!
//! Catalog, metric and attribute names as data rather than code. Loaded from
//! a JSON file; every field is optional and falls back to the built-in
//! presets, so an empty `{}` file is a valid configuration.

use crate::catalog::{
    default_crops, default_soils, find_soil, load_catalog_table, CatalogEntry, ProfileVectorStore,
    SoilProfile, DEFAULT_ATTRIBUTES,
};
use crate::explanation::{load_schemes, SchemeRecord};
use crate::metrics::{MetricConfig, SimilarityMetric};
use crate::scorer::{SuitabilityEngine, DEFAULT_PARALLEL_THRESHOLD};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Attribute names in vector order
    #[serde(default)]
    pub attributes: Option<Vec<String>>,

    #[serde(default)]
    pub metric: MetricConfig,

    #[serde(default)]
    pub parallel_threshold: Option<usize>,

    /// Inline crop catalog
    #[serde(default)]
    pub catalog: Option<Vec<CatalogEntry>>,

    /// CSV/Parquet crop table; overrides `catalog`. Relative paths resolve
    /// against the configuration file's directory.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Named soil profiles available as queries
    #[serde(default)]
    pub soils: Option<Vec<SoilProfile>>,

    /// Knowledge hub CSV listed beside each report
    #[serde(default)]
    pub schemes_path: Option<PathBuf>,
}

/// Configuration with every default filled in and the catalog read
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub attributes: Vec<String>,
    pub metric: MetricConfig,
    pub parallel_threshold: usize,
    pub catalog: Vec<CatalogEntry>,
    pub soils: Vec<SoilProfile>,
    pub schemes: Vec<SchemeRecord>,
}

impl ScoringConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config: {:?}", path))?;

        let mut config: ScoringConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scoring config JSON: {:?}", path))?;

        if let Some(dir) = path.parent() {
            for table in [config.catalog_path.as_mut(), config.schemes_path.as_mut()]
                .into_iter()
                .flatten()
            {
                if table.is_relative() {
                    *table = dir.join(&*table);
                }
            }
        }

        Ok(config)
    }

    /// Fill defaults and read the catalog table if one is configured
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut attributes = self.attributes.clone();

        let catalog = match (&self.catalog_path, &self.catalog) {
            (Some(path), _) => {
                let table = load_catalog_table(path)?;
                if attributes.is_none() {
                    attributes = Some(table.attributes);
                }
                table.entries
            }
            (None, Some(entries)) => entries.clone(),
            (None, None) => default_crops()?,
        };

        let soils = match &self.soils {
            Some(soils) => soils.clone(),
            None => default_soils()?,
        };

        let schemes = match &self.schemes_path {
            Some(path) => load_schemes(path)?,
            None => Vec::new(),
        };

        let attributes = attributes
            .unwrap_or_else(|| DEFAULT_ATTRIBUTES.iter().map(|s| s.to_string()).collect());

        Ok(ResolvedConfig {
            attributes,
            metric: self.metric.clone(),
            parallel_threshold: self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            catalog,
            soils,
            schemes,
        })
    }
}

impl ResolvedConfig {
    /// Build a store holding the configured catalog
    pub fn build_store(&self) -> Result<ProfileVectorStore> {
        ProfileVectorStore::with_entries(self.catalog.clone())
            .with_context(|| "Configured catalog is invalid")
    }

    pub fn build_engine(&self) -> SuitabilityEngine {
        SuitabilityEngine::new(self.parallel_threshold)
    }

    pub fn build_metric(&self) -> Result<Box<dyn SimilarityMetric>> {
        self.metric
            .build()
            .with_context(|| "Configured metric is invalid")
    }

    pub fn soil(&self, name: &str) -> Option<&SoilProfile> {
        find_soil(&self.soils, name)
    }
}
