//! USDA FoodData Central input
//!
//! Reads FDC JSON exports from a single file or a directory of files.

mod dataset;

pub use dataset::{
    finite_amount, Dataset, EntryKind, FoodNutrient, FoodPortion, FoodRecord, MeasureUnit,
    NutrientInfo, MEASUREMENT_KIND,
};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ImportError, ImportResult};

/// List the dataset files under `path`
///
/// A file path is returned as-is. For a directory, only `*.json` entries are
/// kept, sorted by file name so that repeated runs see the same order.
pub fn dataset_files(path: &Path) -> ImportResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry_path = entry?.path();
        let is_json = entry_path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if entry_path.is_file() && is_json {
            files.push(entry_path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(ImportError::NoDatasets(path.to_path_buf()));
    }
    Ok(files)
}

/// Parse one dataset document
///
/// The document must be an object with exactly one key; its value is the
/// ordered list of food records.
pub fn load_dataset(path: &Path) -> ImportResult<Dataset> {
    let reader = BufReader::new(File::open(path)?);
    let json_err = |source: serde_json::Error| ImportError::Json {
        path: path.to_path_buf(),
        source,
    };

    let document: Map<String, Value> = serde_json::from_reader(reader).map_err(json_err)?;
    if document.len() != 1 {
        return Err(ImportError::DatasetShape {
            path: path.to_path_buf(),
            keys: document.len(),
        });
    }

    let Some((name, foods)) = document.into_iter().next() else {
        return Err(ImportError::DatasetShape {
            path: path.to_path_buf(),
            keys: 0,
        });
    };
    let foods: Vec<FoodRecord> = serde_json::from_value(foods).map_err(json_err)?;

    tracing::info!("Loaded dataset '{}' from {} ({} foods)", name, path.display(), foods.len());
    Ok(Dataset { name, foods })
}
