//! Data model for schema-driven row comparison

mod row;
mod schema;

pub use row::Row;
pub use schema::{ColumnSpec, Schema, EVENTALIGN_TOLERANCE};
