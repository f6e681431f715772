//! Row planning
//!
//! Turns USDA food records into target rows with planned identifiers.

pub mod food_plan;
pub mod ids;
pub mod portions;
pub mod rows;

pub use food_plan::{FoodPlan, ImportConfig, DEFAULT_OWNER};
pub use ids::{
    BaseServingLink, Deferred, FoodIds, IdCapture, IdPlanner, IdStrategy, RowId, Table,
};
pub use portions::{derived_servings, portion_unit, DerivedServings};
pub use rows::{FoodRow, ServingNutrientRow, ServingRow, BASE_SERVING_AMOUNT, BASE_SERVING_UNIT};
