//! Target store schema
//!
//! Foods, servings (with the self-referential `relative` column), and the
//! nutrient catalog the importer looks nutrients up in.

use rusqlite::{params, Connection};

use crate::nutrition::target_nutrients;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Create the schema if needed and make sure the nutrient catalog is complete
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    if get_schema_version(conn)? < SCHEMA_VERSION {
        migrate_v1(conn)?;
        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
    }

    let seeded = seed_nutrients(conn)?;
    if seeded > 0 {
        tracing::info!("Seeded {} nutrients into the catalog", seeded);
    }
    Ok(())
}

fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE nutrient (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE food (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            user_id INTEGER NOT NULL
        );

        -- relative is NULL for a food's 100 g base serving; derived servings
        -- point at it and store their own gram weight in amount
        CREATE TABLE serving (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_id INTEGER NOT NULL REFERENCES food(id) ON DELETE CASCADE,
            unit TEXT NOT NULL,
            amount REAL NOT NULL,
            relative INTEGER REFERENCES serving(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_serving_food ON serving(food_id);
        CREATE INDEX idx_serving_relative ON serving(relative);

        CREATE TABLE serving_nutrient (
            serving_id INTEGER NOT NULL REFERENCES serving(id) ON DELETE CASCADE,
            nutrient_id INTEGER NOT NULL REFERENCES nutrient(id),
            amount REAL NOT NULL,
            PRIMARY KEY (serving_id, nutrient_id)
        );
        "#,
    )?;

    Ok(())
}

/// Insert any missing target nutrient names; returns how many were added
fn seed_nutrients(conn: &Connection) -> DbResult<usize> {
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO nutrient (name) VALUES (?1)")?;
    let mut added = 0;
    for name in target_nutrients() {
        added += stmt.execute(params![name])?;
    }
    Ok(added)
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}
