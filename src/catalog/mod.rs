//! Crop catalog: reference requirement vectors and where they come from
//!
//! - `store.rs` - ProfileVectorStore with snapshot-swap loading
//! - `loader.rs` - CSV/Parquet catalog tables via Polars
//! - `presets.rs` - Built-in crop table and soil profiles

pub mod store;
pub mod loader;
pub mod presets;

pub use store::{CatalogEntry, CatalogSnapshot, ProfileVectorStore};
pub use loader::{load_catalog_table, catalog_from_dataframe, CatalogTable};
pub use presets::{default_crops, default_soils, find_soil, SoilProfile, DEFAULT_ATTRIBUTES};
