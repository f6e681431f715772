//! Live apply path
//!
//! Applies food plans to a SQLite store with bound parameters. The id of the
//! base serving comes back from its insert as a `BaseServingCapture` and is
//! passed explicitly to each derived-serving insert of the same food.

use rusqlite::{params_from_iter, Connection};

use crate::error::ImportResult;
use crate::plan::FoodPlan;
use crate::sql::Insert;

/// Identifier the store allocated for a food's base serving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseServingCapture(pub i64);

/// Identifiers allocated while applying one food
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFood {
    pub food_id: i64,
    pub base_serving: BaseServingCapture,
    pub derived_servings: Vec<i64>,
}

/// Apply one food in its own transaction
pub fn apply_food(conn: &mut Connection, plan: &FoodPlan) -> ImportResult<AppliedFood> {
    let tx = conn.transaction()?;

    let food_id = execute(&tx, &plan.food.insert(), None)?;
    let base_serving = BaseServingCapture(execute(&tx, &plan.base_serving.insert(), None)?);

    for row in &plan.nutrients {
        execute(&tx, &row.insert(), None)?;
    }

    let mut derived_servings = Vec::with_capacity(plan.derived.len());
    for row in &plan.derived {
        derived_servings.push(execute(&tx, &row.insert(), Some(base_serving))?);
    }

    tx.commit()?;

    tracing::debug!(
        "Applied '{}' as food {} (base serving {}, {} derived)",
        plan.food.name,
        food_id,
        base_serving.0,
        derived_servings.len()
    );

    Ok(AppliedFood {
        food_id,
        base_serving,
        derived_servings,
    })
}

/// Run one insert and return the rowid it allocated
fn execute(
    conn: &Connection,
    insert: &Insert,
    capture: Option<BaseServingCapture>,
) -> ImportResult<i64> {
    let bound = insert.bind(capture.map(|c| c.0))?;
    conn.execute(&bound.sql, params_from_iter(bound.params.iter()))?;
    Ok(conn.last_insert_rowid())
}
