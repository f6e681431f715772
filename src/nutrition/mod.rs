//! Nutrient mapping and aggregation
//!
//! Translates USDA nutrient observations into the target nutrient catalog.

pub mod aggregator;
pub mod nutrient_map;

pub use aggregator::{aggregate_nutrients, NutrientTotal, NutrientTotals};
pub use nutrient_map::{target_nutrient, target_nutrients, NUTRIENT_MAP};
