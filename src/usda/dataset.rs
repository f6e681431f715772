//! FoodData Central document model
//!
//! Only the fields the importer reads are modeled; everything else in the
//! FDC JSON export is ignored by serde.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Observation kind carried by measured nutrient values
pub const MEASUREMENT_KIND: &str = "FoodNutrient";

/// A parsed dataset document: the single top-level key and its foods
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub foods: Vec<FoodRecord>,
}

/// One food record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    pub description: String,
    pub food_nutrients: Vec<FoodNutrient>,
    #[serde(default)]
    pub food_portions: Vec<FoodPortion>,
}

/// Entry kind discriminator for a nutrient observation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EntryKind {
    /// A measured nutrient amount
    Measurement,
    /// Derived or summary entries; never imported
    Other(String),
}

impl From<String> for EntryKind {
    fn from(s: String) -> Self {
        if s == MEASUREMENT_KIND {
            EntryKind::Measurement
        } else {
            EntryKind::Other(s)
        }
    }
}

/// One nutrient observation
///
/// `amount` is kept as raw JSON. Only observations that end up imported are
/// converted, so derived or unmapped entries with odd amounts never fail a run.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodNutrient {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub nutrient: NutrientInfo,
    #[serde(default)]
    pub amount: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientInfo {
    pub name: String,
    #[serde(default)]
    pub unit_name: String,
}

/// One alternate-unit entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPortion {
    pub measure_unit: MeasureUnit,
    #[serde(default)]
    pub portion_description: Option<String>,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub gram_weight: f64,
}

impl FoodPortion {
    /// Free-text description of the portion, if the record carries one
    pub fn description(&self) -> Option<&str> {
        non_blank(self.portion_description.as_deref())
            .or_else(|| non_blank(self.modifier.as_deref()))
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeasureUnit {
    pub abbreviation: String,
}

/// Finite numeric value of a raw amount
///
/// Numbers arrive either as JSON numbers or as numeric strings.
pub fn finite_amount(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    finite_amount(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("amount {} is not a finite number", value))
    })
}
