//! Knowledge hub: government schemes and programmes shown beside a report
//!
//! The table is free-form. The first column names the scheme and every other
//! non-empty cell becomes part of its description, so the CSV can grow new
//! columns without code changes.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub name: String,
    /// "Column: value" pairs joined with "; "
    pub description: String,
}

/// Load a schemes CSV
pub fn load_schemes(path: &Path) -> Result<Vec<SchemeRecord>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load schemes CSV: {:?}", path))?;

    let schemes = schemes_from_dataframe(&df)
        .with_context(|| format!("Invalid schemes table: {:?}", path))?;

    tracing::info!("Read {} schemes from {:?}", schemes.len(), path);
    Ok(schemes)
}

/// Convert a loaded DataFrame into scheme records
pub fn schemes_from_dataframe(df: &DataFrame) -> Result<Vec<SchemeRecord>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if names.is_empty() {
        anyhow::bail!("Schemes table has no columns");
    }

    // Every column as text so numbers and dates print as written
    let mut columns: Vec<StringChunked> = Vec::with_capacity(names.len());
    for name in &names {
        let cast = df
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::String)
            .with_context(|| format!("Column '{}' cannot be read as text", name))?;
        let values = cast
            .str()
            .with_context(|| format!("Column '{}' cannot be read as text", name))?
            .clone();
        columns.push(values);
    }

    let mut schemes = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let name = match columns[0].get(row).map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                tracing::warn!("Skipping scheme row {} with no name", row);
                continue;
            }
        };

        let description = names
            .iter()
            .zip(columns.iter())
            .skip(1)
            .filter_map(|(header, col)| {
                col.get(row)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{}: {}", header, v))
            })
            .collect::<Vec<_>>()
            .join("; ");

        schemes.push(SchemeRecord { name, description });
    }

    Ok(schemes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_schemes_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemes.csv");
        fs::write(
            &path,
            "Scheme,Benefit,Max Amount\n\
             PM-KISAN,Income support,6000\n\
             Soil Health Card,Free soil testing,\n",
        )
        .unwrap();

        let schemes = load_schemes(&path).unwrap();
        assert_eq!(schemes.len(), 2);
        assert_eq!(schemes[0].name, "PM-KISAN");
        assert_eq!(schemes[0].description, "Benefit: Income support; Max Amount: 6000");
        assert_eq!(schemes[1].description, "Benefit: Free soil testing");
    }

    #[test]
    fn test_rows_without_name_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemes.csv");
        fs::write(&path, "Scheme,Benefit\n,Orphan benefit\nPMFBY,Crop insurance\n").unwrap();

        let schemes = load_schemes(&path).unwrap();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0].name, "PMFBY");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(load_schemes(&dir.path().join("schemes.csv")).is_err());
    }
}
