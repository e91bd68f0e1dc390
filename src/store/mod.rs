//! Data store collaborator.
//!
//! # Responsibilities
//! - Table-qualified insert / select / delete with equality filters
//! - Typed conversion between rows and domain records
//!
//! # Design Decisions
//! - Rows are JSON objects keyed by column name
//! - `Filter` is a conjunction of column = value; empty matches everything
//! - The trait is async so a networked store can replace `MemoryStore`

pub mod memory;
pub mod schema;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;
pub use schema::{ForeignKey, TableSchema};

/// One stored record.
pub type Row = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("{table}.{column} is required")]
    MissingColumn { table: String, column: String },

    #[error("duplicate value {value} for {table}.{column}")]
    Duplicate { table: String, column: String, value: Value },

    #[error("{table}.{column} = {value} references a missing {target} row")]
    ForeignKey {
        table: String,
        column: String,
        value: Value,
        target: String,
    },

    #[error("row is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Conjunction of equality predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(column, value)
    }

    pub fn and(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.conditions
            .iter()
            .all(|(col, expected)| row.get(col) == Some(expected))
    }
}

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert rows; all or nothing. Returns the number inserted.
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<usize, StoreError>;

    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Row>, StoreError>;

    /// Delete matching rows. Returns the number deleted from `table`.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, StoreError>;
}

pub fn to_row<T: Serialize>(record: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(row) => Ok(row),
        _ => Err(StoreError::NotAnObject),
    }
}

pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_filter_matches() {
        let r = row(json!({ "id": "n1", "userId": "u_123" }));

        assert!(Filter::all().matches(&r));
        assert!(Filter::eq("userId", "u_123").matches(&r));
        assert!(!Filter::eq("userId", "u_456").matches(&r));
        assert!(Filter::eq("id", "n1").and("userId", "u_123").matches(&r));
        assert!(!Filter::eq("id", "n1").and("title", "T").matches(&r));
    }

    #[test]
    fn test_to_row_rejects_scalars() {
        assert!(matches!(to_row(&5), Err(StoreError::NotAnObject)));
    }
}
