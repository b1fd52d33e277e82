//! Catalog Table Loading
//!
//! Reads crop requirement tables from CSV or Parquet with Polars.
//!
//! Expected layout: an `id` column, an optional `label` column, then one
//! numeric column per attribute in vector order. Integer columns are cast
//! to Float64; null cells are rejected rather than defaulted.

use super::store::CatalogEntry;
use crate::vector::AttributeVector;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

const ID_COLUMN: &str = "id";
const LABEL_COLUMN: &str = "label";

/// Entries read from a table plus the attribute names taken from its header
#[derive(Debug, Clone)]
pub struct CatalogTable {
    pub attributes: Vec<String>,
    pub entries: Vec<CatalogEntry>,
}

/// Load a catalog table, picking the reader from the file extension
pub fn load_catalog_table(path: &Path) -> Result<CatalogTable> {
    let df = match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan parquet: {:?}", path))?
            .collect()
            .with_context(|| format!("Failed to load catalog parquet: {:?}", path))?,
        _ => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load catalog CSV: {:?}", path))?,
    };

    let table = catalog_from_dataframe(&df)
        .with_context(|| format!("Invalid catalog table: {:?}", path))?;

    tracing::info!(
        "Read {} catalog entries ({} attributes) from {:?}",
        table.entries.len(),
        table.attributes.len(),
        path
    );
    Ok(table)
}

/// Convert an already-loaded DataFrame into catalog entries
pub fn catalog_from_dataframe(df: &DataFrame) -> Result<CatalogTable> {
    let attributes: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| name != ID_COLUMN && name != LABEL_COLUMN)
        .collect();

    if attributes.is_empty() {
        anyhow::bail!("Catalog table has no attribute columns");
    }

    let ids = df
        .column(ID_COLUMN)
        .with_context(|| format!("Column '{}' not found", ID_COLUMN))?
        .str()
        .with_context(|| format!("Column '{}' is not string type", ID_COLUMN))?;

    let labels = df.column(LABEL_COLUMN).ok().and_then(|c| c.str().ok());

    // Cast every attribute column up front so each row is a plain lookup
    let mut columns: Vec<Float64Chunked> = Vec::with_capacity(attributes.len());
    for name in &attributes {
        let cast = df
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        let values = cast
            .f64()
            .with_context(|| format!("Column '{}' is not numeric", name))?
            .clone();
        columns.push(values);
    }

    let mut entries = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let id = ids
            .get(row)
            .with_context(|| format!("Row {} has no id", row))?;

        let label = labels
            .and_then(|l| l.get(row))
            .unwrap_or(id);

        let mut values = Vec::with_capacity(columns.len());
        for (col, name) in columns.iter().zip(attributes.iter()) {
            let value = col
                .get(row)
                .with_context(|| format!("Row '{}' is missing '{}'", id, name))?;
            values.push(value);
        }

        let requirement = AttributeVector::new(values)
            .with_context(|| format!("Row '{}' has an invalid requirement vector", id))?;
        entries.push(CatalogEntry::new(id, label, requirement));
    }

    Ok(CatalogTable { attributes, entries })
}
