//! Import runs
//!
//! Drives datasets through planning, one food at a time, into either a SQL
//! script or a live SQLite store.

use std::io::Write;
use std::path::Path;

use rusqlite::Connection;
use serde::Serialize;

use crate::db::apply::apply_food;
use crate::error::ImportResult;
use crate::plan::{FoodPlan, IdPlanner, ImportConfig};
use crate::sql::ScriptWriter;
use crate::usda::{dataset_files, load_dataset, Dataset};

/// Row counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub datasets: usize,
    pub foods: usize,
    /// Base and derived servings
    pub servings: usize,
    pub derived_servings: usize,
    pub serving_nutrients: usize,
}

impl ImportSummary {
    fn record(&mut self, plan: &FoodPlan) {
        self.foods += 1;
        self.servings += 1 + plan.derived.len();
        self.derived_servings += plan.derived.len();
        self.serving_nutrients += plan.nutrients.len();
    }
}

/// Plans foods in input order and hands each plan to a sink
pub struct Importer {
    planner: IdPlanner,
    owner: i64,
    summary: ImportSummary,
}

impl Importer {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            planner: IdPlanner::new(config.ids),
            owner: config.owner,
            summary: ImportSummary::default(),
        }
    }

    /// Plan every food of `dataset` and pass it to `sink`
    ///
    /// Stops at the first error; foods already handed to the sink stay
    /// handed over.
    pub fn import_dataset<F>(&mut self, dataset: &Dataset, mut sink: F) -> ImportResult<()>
    where
        F: FnMut(&FoodPlan) -> ImportResult<()>,
    {
        let span = tracing::info_span!("dataset", name = %dataset.name);
        let _guard = span.enter();

        for record in &dataset.foods {
            let plan = FoodPlan::build(record, self.owner, &mut self.planner)?;
            tracing::debug!(
                "Planned '{}': {} nutrients, {} derived servings",
                plan.food.name,
                plan.nutrients.len(),
                plan.derived.len()
            );
            sink(&plan)?;
            self.summary.record(&plan);
        }

        self.summary.datasets += 1;
        Ok(())
    }

    pub fn summary(&self) -> ImportSummary {
        self.summary
    }
}

/// Convert every dataset under `input` into a SQL script written to `out`
pub fn write_script<W: Write>(
    input: &Path,
    config: &ImportConfig,
    out: W,
) -> ImportResult<ImportSummary> {
    let mut importer = Importer::new(config);
    let mut writer = ScriptWriter::new(out);

    for path in dataset_files(input)? {
        let dataset = load_dataset(&path)?;
        importer.import_dataset(&dataset, |plan| Ok(writer.write_food(plan)?))?;
    }

    let summary = importer.summary();
    log_summary(&summary);
    Ok(summary)
}

/// Apply every dataset under `input` to a live store
///
/// Each food is committed on its own, so a failure leaves every earlier
/// food in place.
pub fn apply_datasets(
    conn: &mut Connection,
    input: &Path,
    config: &ImportConfig,
) -> ImportResult<ImportSummary> {
    let mut importer = Importer::new(config);

    for path in dataset_files(input)? {
        let dataset = load_dataset(&path)?;
        importer.import_dataset(&dataset, |plan| apply_food(conn, plan).map(|_| ()))?;
    }

    let summary = importer.summary();
    log_summary(&summary);
    Ok(summary)
}

fn log_summary(summary: &ImportSummary) {
    tracing::info!(
        datasets = summary.datasets,
        foods = summary.foods,
        servings = summary.servings,
        derived_servings = summary.derived_servings,
        serving_nutrients = summary.serving_nutrients,
        "Import complete"
    );
}
