//! Derived servings from USDA food portions

use crate::error::ImportResult;
use crate::usda::FoodPortion;

use super::ids::{FoodIds, IdCapture, IdPlanner};
use super::rows::{single_line, ServingRow};

/// Abbreviation USDA uses when a portion has no unit of its own
pub const UNDETERMINED_UNIT: &str = "undetermined";
/// Portion label that restates the 100 g base serving
pub const QUANTITY_NOT_SPECIFIED: &str = "Quantity not specified";

/// Derived servings of one food, with the capture they read from
#[derive(Debug, Default)]
pub struct DerivedServings {
    pub rows: Vec<ServingRow>,
    pub capture: Option<IdCapture>,
}

/// Unit label for a portion, or `None` if the portion is dropped
///
/// An undetermined abbreviation falls back to the portion's description.
/// Portions without a usable label, or labelled "Quantity not specified",
/// carry nothing the base serving doesn't.
pub fn portion_unit(portion: &FoodPortion) -> Option<&str> {
    let unit = if portion.measure_unit.abbreviation == UNDETERMINED_UNIT {
        portion.description()?
    } else {
        portion.measure_unit.abbreviation.as_str()
    };

    if unit == QUANTITY_NOT_SPECIFIED {
        return None;
    }
    Some(unit)
}

/// Build derived servings referencing the base serving in `ids`
///
/// Every kept portion produces a row, duplicates included. The capture is
/// only requested when at least one row needs it.
pub fn derived_servings(
    portions: &[FoodPortion],
    ids: &FoodIds,
    planner: &mut IdPlanner,
) -> ImportResult<DerivedServings> {
    let units: Vec<(&str, f64)> = portions
        .iter()
        .filter_map(|portion| match portion_unit(portion) {
            Some(unit) => Some((unit, portion.gram_weight)),
            None => {
                tracing::trace!(
                    "Dropping portion '{}'",
                    portion.description().unwrap_or(portion.measure_unit.abbreviation.as_str())
                );
                None
            }
        })
        .collect();

    if units.is_empty() {
        return Ok(DerivedServings::default());
    }

    let link = planner.link_base_serving(ids);
    let rows = units
        .into_iter()
        .map(|(unit, grams)| {
            Ok(ServingRow {
                id: planner.next_serving()?,
                food_id: ids.food_ref,
                unit: single_line(unit),
                amount: grams,
                relative: Some(link.relative),
            })
        })
        .collect::<ImportResult<Vec<_>>>()?;

    Ok(DerivedServings {
        rows,
        capture: link.capture,
    })
}
