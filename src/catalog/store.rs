//! Profile Vector Store - in-memory catalog of crop requirement vectors
//!
//! The catalog is held as an immutable snapshot behind an `Arc`. Loading
//! builds and validates a complete new snapshot first, then swaps the pointer
//! under a short exclusive lock, so readers always see either the old or the
//! new catalog and never a partial one.

use crate::error::{Result, SuitabilityError};
use crate::vector::AttributeVector;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One crop's ideal growing profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    pub requirement: AttributeVector,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>, requirement: AttributeVector) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            requirement,
        }
    }
}

/// Validated, read-only view of one loaded catalog
#[derive(Debug)]
pub struct CatalogSnapshot {
    entries: Vec<CatalogEntry>,
    index: FxHashMap<String, usize>,
    dimensionality: usize,
    version: u64,
}

impl CatalogSnapshot {
    fn build(entries: Vec<CatalogEntry>) -> Result<Self> {
        let first = entries.first().ok_or(SuitabilityError::EmptyCatalog)?;
        let dimensionality = first.requirement.dimensionality();

        let mut index = FxHashMap::default();
        index.reserve(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            let actual = entry.requirement.dimensionality();
            if actual != dimensionality {
                return Err(SuitabilityError::DimensionMismatch {
                    expected: dimensionality,
                    actual,
                });
            }
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(SuitabilityError::DuplicateId(entry.id.clone()));
            }
        }

        Ok(Self {
            entries,
            index,
            dimensionality,
            version: 0,
        })
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Load generation this snapshot came from (1 for the first load)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holds and serves the catalog of reference vectors
#[derive(Debug, Default)]
pub struct ProfileVectorStore {
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl ProfileVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store and load `entries` into it
    pub fn with_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let store = Self::new();
        store.load(entries)?;
        Ok(store)
    }

    /// Replace the catalog atomically
    ///
    /// Fails with `DuplicateId`, `DimensionMismatch` or `EmptyCatalog`; on
    /// failure the previously loaded catalog stays in place.
    pub fn load(&self, entries: Vec<CatalogEntry>) -> Result<()> {
        let count = entries.len();

        let mut snapshot = match CatalogSnapshot::build(entries) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Rejected catalog load ({} entries): {}", count, e);
                return Err(e);
            }
        };

        let dimensionality = snapshot.dimensionality();
        let version = {
            let mut guard = self.current.write();
            snapshot.version = guard.as_ref().map_or(0, |s| s.version()) + 1;
            let version = snapshot.version;
            *guard = Some(Arc::new(snapshot));
            version
        };

        tracing::debug!(
            "Loaded catalog v{}: {} entries, {} attributes",
            version,
            count,
            dimensionality
        );
        Ok(())
    }

    /// Current snapshot, shared with the caller
    pub fn snapshot(&self) -> Result<Arc<CatalogSnapshot>> {
        self.current.read().clone().ok_or(SuitabilityError::NotLoaded)
    }

    /// Look up a single entry by id
    pub fn get(&self, id: &str) -> Result<CatalogEntry> {
        let snapshot = self.snapshot()?;
        snapshot
            .get(id)
            .cloned()
            .ok_or_else(|| SuitabilityError::NotFound(id.to_string()))
    }

    /// All entries in insertion order of the last successful load
    pub fn all(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.snapshot()?.entries().to_vec())
    }

    /// Fixed vector length of the current catalog
    pub fn dimensionality(&self) -> Result<usize> {
        Ok(self.snapshot()?.dimensionality())
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}
