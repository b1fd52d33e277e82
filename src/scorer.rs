//! Suitability Engine - scores a soil profile against every crop in the catalog
//!
//! One scoring pass:
//! 1. Take the store's current snapshot (later reloads do not affect the pass)
//! 2. Check dimensionality, then let the metric check the query
//! 3. Score each entry with the selected metric (Rayon for large catalogs)
//! 4. Omit entries whose comparison is undefined, keep the rest
//! 5. Sort by score descending, ties by ascending id, and assign ranks
//!
//! Scoring is a pure function of the query, the metric and the snapshot.

use crate::catalog::{CatalogEntry, CatalogSnapshot, ProfileVectorStore};
use crate::error::{Result, SuitabilityError};
use crate::metrics::{Cosine, SimilarityMetric};
use crate::vector::AttributeVector;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Catalogs with at least this many entries are scored in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Score of one catalog entry within a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub entry_id: String,
    pub label: String,
    pub score: f64,
    /// 1-based position in the ranking
    pub rank: usize,
    /// Per-attribute `requirement - query`; positive means the soil falls short
    pub gaps: Vec<f64>,
}

/// Why an entry was left out of the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmissionReason {
    ZeroMagnitude,
}

impl OmissionReason {
    pub fn display_text(&self) -> &'static str {
        match self {
            OmissionReason::ZeroMagnitude => "requirement vector has zero magnitude",
        }
    }
}

/// Catalog entry that could not be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmittedEntry {
    pub entry_id: String,
    pub label: String,
    pub reason: OmissionReason,
}

/// Ranked outcome of one scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityReport {
    pub query: AttributeVector,
    /// Name of the metric that produced the scores
    pub metric: String,
    /// Version of the catalog snapshot that was scored
    pub catalog_version: u64,
    /// Sorted by score descending, ties by ascending entry id
    pub results: Vec<ScoreResult>,
    pub omitted: Vec<OmittedEntry>,
    pub generated_at: DateTime<Utc>,
}

impl SuitabilityReport {
    /// Best-ranked entry
    pub fn top(&self) -> Option<&ScoreResult> {
        self.results.first()
    }

    pub fn result_for(&self, entry_id: &str) -> Option<&ScoreResult> {
        self.results.iter().find(|r| r.entry_id == entry_id)
    }

    /// Entry ids in rank order
    pub fn ranked_ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.entry_id.as_str()).collect()
    }
}

/// Scores query vectors against catalog snapshots
#[derive(Debug, Clone)]
pub struct SuitabilityEngine {
    parallel_threshold: usize,
}

impl Default for SuitabilityEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}

type EntryOutcome<'a> = (&'a CatalogEntry, Result<f64>);

impl SuitabilityEngine {
    /// Create an engine; catalogs of `parallel_threshold` entries or more are
    /// scored with Rayon
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Score with cosine similarity
    pub fn score(&self, query: &AttributeVector, store: &ProfileVectorStore) -> Result<SuitabilityReport> {
        self.score_with_metric(query, store, &Cosine)
    }

    /// Score with any similarity metric
    ///
    /// # Errors
    /// * `NotLoaded` - the store has no catalog
    /// * `DimensionMismatch` - query length differs from the catalog's, or the
    ///   metric's parameters do not fit the catalog
    /// * `ZeroMagnitude` - the query is all zeros, or no entry could be scored
    /// * `NonFiniteScore` - the metric returned NaN or infinity
    pub fn score_with_metric(
        &self,
        query: &AttributeVector,
        store: &ProfileVectorStore,
        metric: &dyn SimilarityMetric,
    ) -> Result<SuitabilityReport> {
        let snapshot = store.snapshot()?;
        self.score_snapshot(query, &snapshot, metric)
    }

    /// Score several queries against one snapshot, in parallel
    ///
    /// Each query succeeds or fails independently; results keep input order.
    pub fn score_batch(
        &self,
        queries: &[AttributeVector],
        store: &ProfileVectorStore,
        metric: &dyn SimilarityMetric,
    ) -> Result<Vec<Result<SuitabilityReport>>> {
        let snapshot = store.snapshot()?;
        Ok(queries
            .par_iter()
            .map(|query| self.score_snapshot(query, &snapshot, metric))
            .collect())
    }

    /// Score against an explicit snapshot
    pub fn score_snapshot(
        &self,
        query: &AttributeVector,
        snapshot: &CatalogSnapshot,
        metric: &dyn SimilarityMetric,
    ) -> Result<SuitabilityReport> {
        let dimensionality = snapshot.dimensionality();
        if query.dimensionality() != dimensionality {
            return Err(SuitabilityError::DimensionMismatch {
                expected: dimensionality,
                actual: query.dimensionality(),
            });
        }
        metric.validate(dimensionality)?;
        metric.validate_query(query)?;

        let score_entry = |entry: &CatalogEntry| -> Result<f64> {
            if entry.requirement.is_zero() {
                return Err(SuitabilityError::zero_magnitude(format!(
                    "catalog entry '{}'",
                    entry.id
                )));
            }
            let score = metric.similarity(query, &entry.requirement)?;
            if !score.is_finite() {
                return Err(SuitabilityError::NonFiniteScore {
                    metric: metric.name().to_string(),
                    entry_id: entry.id.clone(),
                });
            }
            // -0.0 and 0.0 must tie under total_cmp
            Ok(score + 0.0)
        };

        let outcomes: Vec<EntryOutcome> = if snapshot.len() >= self.parallel_threshold {
            snapshot
                .entries()
                .par_iter()
                .map(|entry| (entry, score_entry(entry)))
                .collect()
        } else {
            snapshot
                .entries()
                .iter()
                .map(|entry| (entry, score_entry(entry)))
                .collect()
        };

        let mut scored: Vec<(&CatalogEntry, f64)> = Vec::with_capacity(outcomes.len());
        let mut omitted = Vec::new();

        for (entry, outcome) in outcomes {
            match outcome {
                Ok(score) => scored.push((entry, score)),
                Err(e) if e.is_entry_local() => {
                    tracing::warn!("Omitting '{}' from ranking: {}", entry.id, e);
                    omitted.push(OmittedEntry {
                        entry_id: entry.id.clone(),
                        label: entry.label.clone(),
                        reason: OmissionReason::ZeroMagnitude,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if scored.is_empty() {
            return Err(SuitabilityError::zero_magnitude("every catalog entry"));
        }

        scored.sort_by(|a, b| rank_order((a.0, a.1), (b.0, b.1)));

        let mut results = Vec::with_capacity(scored.len());
        for (position, (entry, score)) in scored.into_iter().enumerate() {
            results.push(ScoreResult {
                entry_id: entry.id.clone(),
                label: entry.label.clone(),
                score,
                rank: position + 1,
                gaps: query.difference(&entry.requirement)?,
            });
        }

        tracing::debug!(
            "Scored {} entries with {} ({} omitted, catalog v{})",
            results.len(),
            metric.name(),
            omitted.len(),
            snapshot.version()
        );

        Ok(SuitabilityReport {
            query: query.clone(),
            metric: metric.name().to_string(),
            catalog_version: snapshot.version(),
            results,
            omitted,
            generated_at: Utc::now(),
        })
    }
}

/// Score descending, then id ascending
///
/// Scores are finite by the time they get here; only exactly equal scores
/// fall through to the id comparison.
fn rank_order(a: (&CatalogEntry, f64), b: (&CatalogEntry, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_crops;
    use crate::metrics::{Euclidean, WeightedDot};
    use approx::assert_relative_eq;

    fn v(values: &[f64]) -> AttributeVector {
        AttributeVector::new(values.iter().copied()).unwrap()
    }

    fn preset_store() -> ProfileVectorStore {
        ProfileVectorStore::with_entries(default_crops().unwrap()).unwrap()
    }

    #[test]
    fn test_alluvial_ranking() {
        let store = preset_store();
        let report = SuitabilityEngine::default()
            .score(&v(&[90.0, 50.0, 45.0, 30.0]), &store)
            .unwrap();

        assert_eq!(report.ranked_ids(), vec!["wheat", "maize", "rice"]);
        assert_relative_eq!(report.results[0].score, 0.9974, epsilon = 5e-5);
        assert_relative_eq!(report.results[1].score, 0.9712, epsilon = 5e-5);
        assert_relative_eq!(report.results[2].score, 0.9478, epsilon = 5e-5);
        assert_eq!(
            report.results.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(report.metric, "cosine");
        assert_eq!(report.catalog_version, 1);
        assert!(report.omitted.is_empty());
    }

    #[test]
    fn test_gaps_are_requirement_minus_query() {
        let store = preset_store();
        let report = SuitabilityEngine::default()
            .score(&v(&[90.0, 50.0, 45.0, 30.0]), &store)
            .unwrap();
        let wheat = report.result_for("wheat").unwrap();
        assert_eq!(wheat.gaps, vec![-10.0, -10.0, -5.0, -10.0]);
    }

    #[test]
    fn test_exact_tie_broken_by_id() {
        // Clay is exactly 60 units from both wheat and rice
        let store = preset_store();
        let report = SuitabilityEngine::default()
            .score_with_metric(&v(&[50.0, 30.0, 30.0, 70.0]), &store, &Euclidean)
            .unwrap();

        assert_eq!(report.ranked_ids(), vec!["maize", "rice", "wheat"]);
        assert_eq!(report.results[1].score, report.results[2].score);
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let store = preset_store();
        let result = SuitabilityEngine::default().score(&v(&[90.0, 50.0, 45.0]), &store);
        assert_eq!(
            result,
            Err(SuitabilityError::DimensionMismatch { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn test_metric_weights_checked_against_catalog() {
        let store = preset_store();
        let metric = WeightedDot::new(vec![1.0, 2.0]).unwrap();
        let result = SuitabilityEngine::default()
            .score_with_metric(&v(&[90.0, 50.0, 45.0, 30.0]), &store, &metric);
        assert_eq!(
            result,
            Err(SuitabilityError::DimensionMismatch { expected: 4, actual: 2 })
        );
    }

    #[test]
    fn test_not_loaded() {
        let store = ProfileVectorStore::new();
        let result = SuitabilityEngine::default().score(&v(&[1.0]), &store);
        assert_eq!(result, Err(SuitabilityError::NotLoaded));
    }

    #[test]
    fn test_zero_query_fails() {
        let store = preset_store();
        let result = SuitabilityEngine::default().score(&v(&[0.0, 0.0, 0.0, 0.0]), &store);
        assert!(matches!(result, Err(SuitabilityError::ZeroMagnitude { .. })));
    }

    #[test]
    fn test_zero_entry_omitted() {
        let mut crops = default_crops().unwrap();
        crops.push(CatalogEntry::new("fallow", "Fallow", v(&[0.0, 0.0, 0.0, 0.0])));
        let store = ProfileVectorStore::with_entries(crops).unwrap();

        let report = SuitabilityEngine::default()
            .score(&v(&[70.0, 40.0, 60.0, 50.0]), &store)
            .unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.omitted.len(), 1);
        assert_eq!(report.omitted[0].entry_id, "fallow");
        assert_eq!(report.omitted[0].reason, OmissionReason::ZeroMagnitude);
    }

    #[test]
    fn test_all_entries_zero_fails() {
        let store = ProfileVectorStore::with_entries(vec![
            CatalogEntry::new("a", "A", v(&[0.0, 0.0])),
            CatalogEntry::new("b", "B", v(&[0.0, 0.0])),
        ])
        .unwrap();
        let result = SuitabilityEngine::default().score(&v(&[1.0, 1.0]), &store);
        assert!(matches!(result, Err(SuitabilityError::ZeroMagnitude { .. })));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let store = preset_store();
        let query = v(&[70.0, 40.0, 60.0, 50.0]);
        let sequential = SuitabilityEngine::new(usize::MAX).score(&query, &store).unwrap();
        let parallel = SuitabilityEngine::new(0).score(&query, &store).unwrap();
        assert_eq!(sequential.results, parallel.results);
    }

    #[test]
    fn test_batch_keeps_order_and_independent_failures() {
        let store = preset_store();
        let queries = vec![
            v(&[90.0, 50.0, 45.0, 30.0]),
            v(&[0.0, 0.0, 0.0, 0.0]),
            v(&[50.0, 30.0, 30.0, 70.0]),
        ];
        let reports = SuitabilityEngine::default()
            .score_batch(&queries, &store, &Cosine)
            .unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].as_ref().unwrap().top().unwrap().entry_id, "wheat");
        assert!(reports[1].is_err());
        assert_eq!(reports[2].as_ref().unwrap().top().unwrap().entry_id, "rice");
    }

    #[test]
    fn test_huge_query_ranks_like_unscaled() {
        let store = preset_store();
        let report = SuitabilityEngine::default()
            .score(&v(&[90e154, 50e154, 45e154, 30e154]), &store)
            .unwrap();

        assert_eq!(report.ranked_ids(), vec!["wheat", "maize", "rice"]);
        assert_relative_eq!(report.results[0].score, 0.9974, epsilon = 5e-5);
    }

    #[test]
    fn test_huge_entries_never_score_nan() {
        let store = ProfileVectorStore::with_entries(vec![
            CatalogEntry::new("a", "A", v(&[1e200, 1e200])),
            CatalogEntry::new("b", "B", v(&[1.0, 2.0])),
        ])
        .unwrap();

        for metric in [&Cosine as &dyn SimilarityMetric, &Euclidean] {
            let report = SuitabilityEngine::default()
                .score_with_metric(&v(&[1e200, 1e200]), &store, metric)
                .unwrap();
            assert_eq!(report.ranked_ids(), vec!["a", "b"]);
            assert!(report.results.iter().all(|r| r.score.is_finite()));
            assert_relative_eq!(report.results[0].score, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tiny_query_is_not_zero() {
        let store = preset_store();
        let report = SuitabilityEngine::default()
            .score(&v(&[9e-170, 5e-170, 4.5e-170, 3e-170]), &store)
            .unwrap();

        assert_eq!(report.ranked_ids(), vec!["wheat", "maize", "rice"]);
        assert!(report.omitted.is_empty());
    }

    #[test]
    fn test_weighted_zero_query_blames_query() {
        let store = preset_store();
        let metric = WeightedDot::new(vec![0.0, 0.0, 0.0, 1.0]).unwrap();
        let result = SuitabilityEngine::default()
            .score_with_metric(&v(&[90.0, 50.0, 45.0, 0.0]), &store, &metric);

        assert_eq!(
            result.unwrap_err(),
            SuitabilityError::zero_magnitude("query (weighted)")
        );
    }

    struct NanMetric;

    impl SimilarityMetric for NanMetric {
        fn name(&self) -> &'static str {
            "nan"
        }

        fn similarity(&self, _query: &AttributeVector, _reference: &AttributeVector) -> Result<f64> {
            Ok(f64::NAN)
        }
    }

    #[test]
    fn test_non_finite_score_rejected() {
        let store = preset_store();
        let result = SuitabilityEngine::default()
            .score_with_metric(&v(&[90.0, 50.0, 45.0, 30.0]), &store, &NanMetric);

        assert!(matches!(
            result,
            Err(SuitabilityError::NonFiniteScore { ref metric, .. }) if metric == "nan"
        ));
    }
}
