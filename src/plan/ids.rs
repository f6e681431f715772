//! Identifier planning
//!
//! Rows are generated without a connection to the target store, so their
//! primary keys are usually not known yet. A `RowId` is either a concrete
//! value or a deferred expression that the store resolves when the statement
//! is applied. Deferred expressions only resolve correctly when statements are
//! applied one at a time, in emission order, with no other writer in between.

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};

/// Tables whose identifiers are allocated during an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Food,
    Serving,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Food => "food",
            Table::Serving => "serving",
        }
    }
}

/// How a pending identifier is resolved at apply time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// The identifier the store will allocate next for the table
    Next(Table),
    /// The identifier the store allocated most recently for the table
    Last(Table),
    /// The current food's base serving, read back from its capture
    Captured,
}

/// Primary key of a generated row, or a reference to one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowId {
    Pending(Deferred),
    Resolved(i64),
}

/// How identifiers are assigned for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum IdStrategy {
    /// Let the target store allocate every identifier at apply time
    #[default]
    Deferred,
    /// Assign concrete identifiers offline, starting from known values
    Sequential { next_food: i64, next_serving: i64 },
}

/// Identifier capture for one food's base serving
///
/// Holds "the serving id just allocated" between the base-serving insert and
/// the last derived-serving insert of the same food. A capture is created per
/// food and consumed by that food's plan; it is never shared across foods.
#[derive(Debug, PartialEq, Eq)]
pub struct IdCapture {
    _private: (),
}

impl IdCapture {
    /// Reference to the captured base-serving identifier
    pub fn relative(&self) -> RowId {
        RowId::Pending(Deferred::Captured)
    }
}

/// Identifiers for a food and its base serving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodIds {
    /// Primary key written by the food insert
    pub food: RowId,
    /// How rows after the food insert refer to the food
    pub food_ref: RowId,
    /// Primary key written by the base-serving insert
    pub base_serving: RowId,
    /// How rows after the base-serving insert refer to it
    pub base_serving_ref: RowId,
}

/// Link from derived servings back to their base serving
#[derive(Debug)]
pub struct BaseServingLink {
    pub relative: RowId,
    /// Present when the base serving id is only known at apply time
    pub capture: Option<IdCapture>,
}

/// Allocates row identifiers according to an `IdStrategy`
#[derive(Debug, Clone)]
pub struct IdPlanner {
    strategy: IdStrategy,
}

impl IdPlanner {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    /// Allocate the food and base-serving identifiers for the next food
    pub fn begin_food(&mut self) -> ImportResult<FoodIds> {
        let ids = match &mut self.strategy {
            IdStrategy::Deferred => FoodIds {
                food: RowId::Pending(Deferred::Next(Table::Food)),
                food_ref: RowId::Pending(Deferred::Last(Table::Food)),
                base_serving: RowId::Pending(Deferred::Next(Table::Serving)),
                base_serving_ref: RowId::Pending(Deferred::Last(Table::Serving)),
            },
            IdStrategy::Sequential {
                next_food,
                next_serving,
            } => {
                let food = RowId::Resolved(take_next(next_food, Table::Food)?);
                let base_serving = RowId::Resolved(take_next(next_serving, Table::Serving)?);
                FoodIds {
                    food,
                    food_ref: food,
                    base_serving,
                    base_serving_ref: base_serving,
                }
            }
        };
        Ok(ids)
    }

    /// Allocate the identifier of a derived serving
    pub fn next_serving(&mut self) -> ImportResult<RowId> {
        match &mut self.strategy {
            IdStrategy::Deferred => Ok(RowId::Pending(Deferred::Next(Table::Serving))),
            IdStrategy::Sequential { next_serving, .. } => {
                Ok(RowId::Resolved(take_next(next_serving, Table::Serving)?))
            }
        }
    }

    /// Link derived servings to the base serving of `ids`
    ///
    /// A concrete base-serving id is referenced directly. A deferred one needs
    /// a fresh capture, taken right after the base serving is applied.
    pub fn link_base_serving(&self, ids: &FoodIds) -> BaseServingLink {
        match ids.base_serving {
            RowId::Resolved(id) => BaseServingLink {
                relative: RowId::Resolved(id),
                capture: None,
            },
            RowId::Pending(_) => {
                let capture = IdCapture { _private: () };
                BaseServingLink {
                    relative: capture.relative(),
                    capture: Some(capture),
                }
            }
        }
    }
}

fn take_next(counter: &mut i64, table: Table) -> ImportResult<i64> {
    let id = *counter;
    *counter = id
        .checked_add(1)
        .ok_or(ImportError::IdOverflow(table.as_str()))?;
    Ok(id)
}
