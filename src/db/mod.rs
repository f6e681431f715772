//! Database module
//!
//! Handles the SQLite target store: connection, schema, and live apply.

pub mod apply;
pub mod connection;
pub mod schema;

pub use apply::{apply_food, AppliedFood, BaseServingCapture};
pub use connection::{Database, DbError, DbResult};
