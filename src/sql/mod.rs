//! SQL statement rendering
//!
//! Statement model and the per-food script writer.

pub mod emitter;
pub mod statement;

pub use emitter::ScriptWriter;
pub use statement::{id_expr, quote_literal, BoundInsert, Insert, SqlValue, Statement, CAPTURE_TABLE};
