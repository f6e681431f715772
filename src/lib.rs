//! USDA FoodData Central importer
//!
//! Converts FDC JSON datasets into food, serving, and serving-nutrient rows,
//! either as an ordered SQL script or applied directly to a SQLite store.

pub mod build_info;
pub mod db;
pub mod error;
pub mod import;
pub mod nutrition;
pub mod plan;
pub mod sql;
pub mod usda;

pub use error::{ImportError, ImportResult};
pub use import::{apply_datasets, write_script, ImportSummary, Importer};
pub use plan::{IdStrategy, ImportConfig};
