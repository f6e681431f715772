//! Per-food nutrient aggregation
//!
//! Folds a food's USDA observations into one total per target nutrient.

use std::collections::HashMap;

use crate::error::{ImportError, ImportResult};
use crate::usda::{finite_amount, EntryKind, FoodNutrient};

use super::nutrient_map::target_nutrient;

/// Summed amount for one target nutrient
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientTotal {
    pub name: &'static str,
    pub amount: f64,
    /// Unit of the first contributing observation. Informational only: the
    /// target schema stores amounts in each nutrient's implicit unit.
    pub unit: String,
}

/// Target nutrient totals for one food
///
/// Keys are unique. Totals keep the order in which each target name was
/// first seen so the emitted script is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct NutrientTotals {
    totals: Vec<NutrientTotal>,
    index: HashMap<&'static str, usize>,
}

impl NutrientTotals {
    /// Add `amount` to the total for `name`, creating it if needed, and
    /// return the new total
    ///
    /// Colliding observations are assumed to share a unit; no conversion is
    /// attempted.
    pub fn add(&mut self, name: &'static str, amount: f64, unit: &str) -> f64 {
        match self.index.get(name) {
            Some(&i) => {
                self.totals[i].amount += amount;
                self.totals[i].amount
            }
            None => {
                self.index.insert(name, self.totals.len());
                self.totals.push(NutrientTotal {
                    name,
                    amount,
                    unit: unit.to_string(),
                });
                amount
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&i| self.totals[i].amount)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NutrientTotal> {
        self.totals.iter()
    }
}

/// Aggregate a food's observations into target nutrient totals
///
/// Non-measurement entries and unmapped names are skipped without looking at
/// their amounts. A mapped measurement whose amount is missing or not a finite
/// number aborts the import, as does a total that overflows.
pub fn aggregate_nutrients(food: &str, nutrients: &[FoodNutrient]) -> ImportResult<NutrientTotals> {
    let mut totals = NutrientTotals::default();

    for observation in nutrients {
        if observation.kind != EntryKind::Measurement {
            continue;
        }
        let Some(target) = target_nutrient(&observation.nutrient.name) else {
            tracing::trace!("Dropping unmapped nutrient '{}'", observation.nutrient.name);
            continue;
        };
        let raw = observation
            .amount
            .as_ref()
            .ok_or_else(|| ImportError::MissingAmount {
                food: food.to_string(),
                nutrient: observation.nutrient.name.clone(),
            })?;
        let amount = finite_amount(raw).ok_or_else(|| ImportError::InvalidAmount {
            food: food.to_string(),
            nutrient: observation.nutrient.name.clone(),
            value: raw.to_string(),
        })?;

        if !totals.add(target, amount, &observation.nutrient.unit_name).is_finite() {
            return Err(ImportError::NonFiniteTotal {
                food: food.to_string(),
                nutrient: target.to_string(),
            });
        }
    }

    Ok(totals)
}
