//! Per-food row plan
//!
//! Everything one food contributes to the target store, in apply order.

use serde::{Deserialize, Serialize};

use crate::error::ImportResult;
use crate::nutrition::aggregate_nutrients;
use crate::sql::Statement;
use crate::usda::FoodRecord;

use super::ids::{IdCapture, IdPlanner, IdStrategy};
use super::portions::derived_servings;
use super::rows::{single_line, FoodRow, ServingNutrientRow, ServingRow};

/// Owner written on every food row when none is configured
pub const DEFAULT_OWNER: i64 = 1;

/// Settings shared by every food of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// User id stored as the owner of every imported food
    pub owner: i64,
    pub ids: IdStrategy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER,
            ids: IdStrategy::Deferred,
        }
    }
}

/// Rows generated for a single food
#[derive(Debug)]
pub struct FoodPlan {
    pub food: FoodRow,
    pub base_serving: ServingRow,
    /// Attached to the base serving only; one row per target nutrient
    pub nutrients: Vec<ServingNutrientRow>,
    pub derived: Vec<ServingRow>,
    /// Set when derived servings read the base serving id at apply time
    pub capture: Option<IdCapture>,
}

impl FoodPlan {
    /// Plan the rows for one USDA food record
    pub fn build(record: &FoodRecord, owner: i64, planner: &mut IdPlanner) -> ImportResult<Self> {
        let totals = aggregate_nutrients(&record.description, &record.food_nutrients)?;
        let ids = planner.begin_food()?;

        let food = FoodRow {
            id: ids.food,
            name: single_line(&record.description),
            owner,
        };
        let base_serving = ServingRow::base(ids.base_serving, ids.food_ref);
        let nutrients = totals
            .iter()
            .map(|total| ServingNutrientRow {
                serving_id: ids.base_serving_ref,
                nutrient: total.name,
                amount: total.amount,
            })
            .collect();
        let derived = derived_servings(&record.food_portions, &ids, planner)?;

        Ok(Self {
            food,
            base_serving,
            nutrients,
            derived: derived.rows,
            capture: derived.capture,
        })
    }

    /// Statements for this food in apply order
    ///
    /// Food, base serving, its nutrients, then the derived servings wrapped
    /// in the capture that resolves their `relative` reference.
    pub fn statements(&self) -> Vec<Statement> {
        let mut statements = Vec::with_capacity(self.nutrients.len() + self.derived.len() + 4);

        statements.push(Statement::Insert(self.food.insert()));
        statements.push(Statement::Insert(self.base_serving.insert()));
        statements.extend(
            self.nutrients
                .iter()
                .map(|row| Statement::Insert(row.insert())),
        );

        if self.capture.is_some() {
            statements.push(Statement::BeginCapture);
        }
        statements.extend(
            self.derived
                .iter()
                .map(|row| Statement::Insert(row.insert())),
        );
        if self.capture.is_some() {
            statements.push(Statement::EndCapture);
        }

        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Deferred, RowId, Table};

    fn record(json: &str) -> FoodRecord {
        serde_json::from_str(json).unwrap()
    }

    const APPLE: &str = r#"{
        "description": "Apple, raw",
        "foodNutrients": [
            {"type": "FoodNutrient", "nutrient": {"name": "Protein", "unitName": "g"}, "amount": 0.3},
            {"type": "FoodNutrient", "nutrient": {"name": "Carbohydrate, by difference", "unitName": "g"}, "amount": 14},
            {"type": "FoodNutrient", "nutrient": {"name": "Fatty acids, total monounsaturated", "unitName": "g"}, "amount": 0.01},
            {"type": "FoodNutrient", "nutrient": {"name": "Fatty acids, total polyunsaturated", "unitName": "g"}, "amount": 0.02}
        ]
    }"#;

    #[test]
    fn test_apple_plan() {
        let mut planner = IdPlanner::new(IdStrategy::Deferred);
        let plan = FoodPlan::build(&record(APPLE), DEFAULT_OWNER, &mut planner).unwrap();

        assert_eq!(plan.food.name, "Apple, raw");
        assert_eq!(plan.food.owner, 1);
        assert!(plan.base_serving.is_base());
        assert_eq!(plan.base_serving.unit, "g");
        assert_eq!(plan.base_serving.amount, 100.0);
        assert_eq!(plan.base_serving.food_id, RowId::Pending(Deferred::Last(Table::Food)));

        let nutrients: Vec<_> = plan.nutrients.iter().map(|n| (n.nutrient, n.amount)).collect();
        assert_eq!(
            nutrients,
            vec![
                ("Protein", 0.3),
                ("Carbohydrates", 14.0),
                ("Unsaturated Fat", 0.01 + 0.02),
            ]
        );
        assert!(plan
            .nutrients
            .iter()
            .all(|n| n.serving_id == RowId::Pending(Deferred::Last(Table::Serving))));
        assert!(plan.derived.is_empty());
        assert!(plan.capture.is_none());

        let statements = plan.statements();
        assert_eq!(statements.len(), 5);
        assert!(!statements.contains(&Statement::BeginCapture));
    }

    #[test]
    fn test_statement_order_with_portions() {
        let json = r#"{
            "description": "Flour, wheat",
            "foodNutrients": [
                {"type": "FoodNutrient", "nutrient": {"name": "Protein", "unitName": "g"}, "amount": 10}
            ],
            "foodPortions": [
                {"measureUnit": {"abbreviation": "cup"}, "gramWeight": 120},
                {"measureUnit": {"abbreviation": "undetermined"}, "portionDescription": "Quantity not specified", "gramWeight": 100},
                {"measureUnit": {"abbreviation": "tbsp"}, "gramWeight": 7.8}
            ]
        }"#;

        let mut planner = IdPlanner::new(IdStrategy::Deferred);
        let plan = FoodPlan::build(&record(json), 7, &mut planner).unwrap();
        let statements = plan.statements();

        let kinds: Vec<&str> = statements
            .iter()
            .map(|s| match s {
                Statement::Insert(insert) => insert.table,
                Statement::BeginCapture => "begin",
                Statement::EndCapture => "end",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["food", "serving", "serving_nutrient", "begin", "serving", "serving", "end"]
        );
        assert_eq!(plan.derived[0].unit, "cup");
        assert_eq!(plan.derived[1].unit, "tbsp");
        assert_eq!(plan.derived[1].amount, 7.8);
    }

    #[test]
    fn test_missing_amount_fails_plan() {
        let json = r#"{
            "description": "Mystery",
            "foodNutrients": [
                {"type": "FoodNutrient", "nutrient": {"name": "Protein", "unitName": "g"}}
            ]
        }"#;
        let mut planner = IdPlanner::new(IdStrategy::Deferred);
        assert!(FoodPlan::build(&record(json), 1, &mut planner).is_err());
    }
}
