//! Target store rows
//!
//! Row values are kept raw; quoting happens when a row is rendered.

use crate::sql::{Insert, SqlValue};

use super::ids::RowId;

/// Unit of every food's base serving
pub const BASE_SERVING_UNIT: &str = "g";
/// Amount of every food's base serving; USDA reports nutrients per 100 g
pub const BASE_SERVING_AMOUNT: f64 = 100.0;

/// Collapse a multi-line label onto one line
///
/// Script blocks are separated by blank lines, so no label written into a
/// literal may contain one. Each line is trimmed and blank lines are dropped.
pub fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A row of `food`
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRow {
    pub id: RowId,
    pub name: String,
    pub owner: i64,
}

impl FoodRow {
    pub fn insert(&self) -> Insert {
        Insert::new("food")
            .value("id", SqlValue::Id(self.id))
            .value("name", SqlValue::Text(self.name.clone()))
            .value("user_id", SqlValue::Integer(self.owner))
    }
}

/// A row of `serving`
///
/// `relative` is `None` for the base serving and points at the base serving
/// for every derived one.
#[derive(Debug, Clone, PartialEq)]
pub struct ServingRow {
    pub id: RowId,
    pub food_id: RowId,
    pub unit: String,
    pub amount: f64,
    pub relative: Option<RowId>,
}

impl ServingRow {
    /// The 100 g serving nutrient amounts are attached to
    pub fn base(id: RowId, food_id: RowId) -> Self {
        Self {
            id,
            food_id,
            unit: BASE_SERVING_UNIT.to_string(),
            amount: BASE_SERVING_AMOUNT,
            relative: None,
        }
    }

    pub fn is_base(&self) -> bool {
        self.relative.is_none()
    }

    pub fn insert(&self) -> Insert {
        Insert::new("serving")
            .value("id", SqlValue::Id(self.id))
            .value("food_id", SqlValue::Id(self.food_id))
            .value("unit", SqlValue::Text(self.unit.clone()))
            .value("amount", SqlValue::Real(self.amount))
            .value(
                "relative",
                self.relative.map(SqlValue::Id).unwrap_or(SqlValue::Null),
            )
    }
}

/// A row of `serving_nutrient`
#[derive(Debug, Clone, PartialEq)]
pub struct ServingNutrientRow {
    pub serving_id: RowId,
    pub nutrient: &'static str,
    pub amount: f64,
}

impl ServingNutrientRow {
    pub fn insert(&self) -> Insert {
        Insert::new("serving_nutrient")
            .value("serving_id", SqlValue::Id(self.serving_id))
            .value("nutrient_id", SqlValue::NutrientId(self.nutrient.to_string()))
            .value("amount", SqlValue::Real(self.amount))
    }
}
