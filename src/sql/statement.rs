//! Insert statement model
//!
//! Statements keep their values unrendered. They are turned into text only at
//! the script boundary (`to_sql`), where string literals get their single
//! quotes doubled, or bound as parameters for a live SQLite store (`bind`),
//! where no escaping happens at all.

use rusqlite::types::Value;

use crate::error::{ImportError, ImportResult};
use crate::plan::{Deferred, RowId};

/// Temporary table holding a food's captured base-serving id
pub const CAPTURE_TABLE: &str = "base_serving_capture";

/// A single value in an insert
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Id(RowId),
    /// Identifier of a catalog nutrient, looked up by name
    NutrientId(String),
    Text(String),
    Real(f64),
    Integer(i64),
    Null,
}

/// `INSERT INTO table(columns) VALUES(values)`
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: &'static str,
    pub columns: Vec<(&'static str, SqlValue)>,
}

/// An insert rendered for parameter binding
#[derive(Debug, Clone, PartialEq)]
pub struct BoundInsert {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Insert {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
        }
    }

    pub fn value(mut self, column: &'static str, value: SqlValue) -> Self {
        self.columns.push((column, value));
        self
    }

    fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|(column, _)| *column)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render as a self-contained statement with literal values
    pub fn to_sql(&self) -> String {
        let values = self
            .columns
            .iter()
            .map(|(_, value)| literal(value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("INSERT INTO {}({}) VALUES({});", self.table, self.column_list(), values)
    }

    /// Render with `?N` placeholders and collect the bound values
    ///
    /// `captured` is the base-serving id returned by the live apply step.
    /// Statements that reference a capture fail to bind without one.
    pub fn bind(&self, captured: Option<i64>) -> ImportResult<BoundInsert> {
        let mut params = Vec::new();
        let mut values = Vec::with_capacity(self.columns.len());

        for (_, value) in &self.columns {
            let rendered = match value {
                SqlValue::Id(RowId::Pending(Deferred::Captured)) => match captured {
                    Some(id) => id.to_string(),
                    None => {
                        return Err(ImportError::UnresolvedId(id_expr(RowId::Pending(
                            Deferred::Captured,
                        ))))
                    }
                },
                SqlValue::Id(id) => id_expr(*id),
                SqlValue::NutrientId(name) => {
                    params.push(Value::Text(name.clone()));
                    format!("(SELECT id FROM nutrient WHERE name = ?{})", params.len())
                }
                SqlValue::Text(s) => {
                    params.push(Value::Text(s.clone()));
                    format!("?{}", params.len())
                }
                SqlValue::Real(n) => {
                    params.push(Value::Real(*n));
                    format!("?{}", params.len())
                }
                SqlValue::Integer(n) => {
                    params.push(Value::Integer(*n));
                    format!("?{}", params.len())
                }
                SqlValue::Null => "NULL".to_string(),
            };
            values.push(rendered);
        }

        Ok(BoundInsert {
            sql: format!(
                "INSERT INTO {}({}) VALUES({})",
                self.table,
                self.column_list(),
                values.join(", ")
            ),
            params,
        })
    }
}

/// One statement of a generated script
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Insert),
    /// Record the serving id allocated by the preceding insert
    BeginCapture,
    /// Discard the capture once the food's derived servings are written
    EndCapture,
}

impl Statement {
    pub fn to_sql(&self) -> String {
        match self {
            Statement::Insert(insert) => insert.to_sql(),
            Statement::BeginCapture => format!(
                "CREATE TEMP TABLE {} AS SELECT MAX(id) AS id FROM serving;",
                CAPTURE_TABLE
            ),
            Statement::EndCapture => format!("DROP TABLE {};", CAPTURE_TABLE),
        }
    }
}

/// SQL expression that resolves an identifier inside the target store
pub fn id_expr(id: RowId) -> String {
    match id {
        RowId::Resolved(n) => n.to_string(),
        RowId::Pending(Deferred::Next(table)) => {
            format!("(SELECT COALESCE(MAX(id), 0) + 1 FROM {})", table.as_str())
        }
        RowId::Pending(Deferred::Last(table)) => {
            format!("(SELECT MAX(id) FROM {})", table.as_str())
        }
        RowId::Pending(Deferred::Captured) => format!("(SELECT id FROM {})", CAPTURE_TABLE),
    }
}

/// Quote a string literal, doubling embedded single quotes
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn literal(value: &SqlValue) -> String {
    match value {
        SqlValue::Id(id) => id_expr(*id),
        SqlValue::NutrientId(name) => {
            format!("(SELECT id FROM nutrient WHERE name = {})", quote_literal(name))
        }
        SqlValue::Text(s) => quote_literal(s),
        SqlValue::Real(n) => n.to_string(),
        SqlValue::Integer(n) => n.to_string(),
        SqlValue::Null => "NULL".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Table;

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("Apple, raw"), "'Apple, raw'");
        assert_eq!(quote_literal("Babyfood, Gerber's"), "'Babyfood, Gerber''s'");
        assert_eq!(quote_literal("''"), "''''''");
    }

    #[test]
    fn test_id_expr() {
        assert_eq!(id_expr(RowId::Resolved(7)), "7");
        assert_eq!(
            id_expr(RowId::Pending(Deferred::Next(Table::Food))),
            "(SELECT COALESCE(MAX(id), 0) + 1 FROM food)"
        );
        assert_eq!(
            id_expr(RowId::Pending(Deferred::Last(Table::Serving))),
            "(SELECT MAX(id) FROM serving)"
        );
        assert_eq!(
            id_expr(RowId::Pending(Deferred::Captured)),
            "(SELECT id FROM base_serving_capture)"
        );
    }

    #[test]
    fn test_insert_to_sql() {
        let insert = Insert::new("serving_nutrient")
            .value("serving_id", SqlValue::Id(RowId::Pending(Deferred::Last(Table::Serving))))
            .value("nutrient_id", SqlValue::NutrientId("Vitamin B12".to_string()))
            .value("amount", SqlValue::Real(0.5));

        assert_eq!(
            insert.to_sql(),
            "INSERT INTO serving_nutrient(serving_id, nutrient_id, amount) VALUES(\
             (SELECT MAX(id) FROM serving), \
             (SELECT id FROM nutrient WHERE name = 'Vitamin B12'), 0.5);"
        );
    }

    #[test]
    fn test_real_literals() {
        assert_eq!(literal(&SqlValue::Real(100.0)), "100");
        assert_eq!(literal(&SqlValue::Real(14.0)), "14");
        assert_eq!(literal(&SqlValue::Real(0.3)), "0.3");
        assert_eq!(literal(&SqlValue::Null), "NULL");
    }

    #[test]
    fn test_bind_uses_parameters() {
        let insert = Insert::new("food")
            .value("id", SqlValue::Id(RowId::Pending(Deferred::Next(Table::Food))))
            .value("name", SqlValue::Text("Gerber's".to_string()))
            .value("user_id", SqlValue::Integer(1));

        let bound = insert.bind(None).unwrap();
        assert_eq!(
            bound.sql,
            "INSERT INTO food(id, name, user_id) VALUES(\
             (SELECT COALESCE(MAX(id), 0) + 1 FROM food), ?1, ?2)"
        );
        assert_eq!(
            bound.params,
            vec![Value::Text("Gerber's".to_string()), Value::Integer(1)]
        );
    }

    #[test]
    fn test_bind_capture() {
        let insert = Insert::new("serving")
            .value("relative", SqlValue::Id(RowId::Pending(Deferred::Captured)));

        assert!(matches!(insert.bind(None), Err(ImportError::UnresolvedId(_))));

        let bound = insert.bind(Some(42)).unwrap();
        assert_eq!(bound.sql, "INSERT INTO serving(relative) VALUES(42)");
        assert!(bound.params.is_empty());
    }

    #[test]
    fn test_capture_statements() {
        assert_eq!(
            Statement::BeginCapture.to_sql(),
            "CREATE TEMP TABLE base_serving_capture AS SELECT MAX(id) AS id FROM serving;"
        );
        assert_eq!(
            Statement::EndCapture.to_sql(),
            "DROP TABLE base_serving_capture;"
        );
    }
}
