//! In-process data store backed by `DashMap`.
//!
//! Each table is a separate map entry. Constraint checks that span tables
//! (foreign keys, cascades) take one table guard at a time, so they are not
//! atomic with respect to concurrent writers on the other table.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::store::schema::{self, TableSchema};
use crate::store::{DataStore, Filter, Row, StoreError};

struct Table {
    schema: TableSchema,
    rows: Vec<Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: DashMap<String, Table>,
}

impl MemoryStore {
    /// A store with no tables. Call [`MemoryStore::migrate`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the users and notes tables already created.
    pub fn with_initial_schema() -> Self {
        let store = Self::new();
        store.migrate(schema::initial());
        store
    }

    /// Create any table that does not exist yet. Existing tables are kept.
    pub fn migrate(&self, schemas: Vec<TableSchema>) {
        for schema in schemas {
            let name = schema.name;
            self.tables.entry(name.to_string()).or_insert_with(|| {
                tracing::debug!(table = name, "Created table");
                Table {
                    schema,
                    rows: Vec::new(),
                }
            });
        }
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    fn schema(&self, table: &str) -> Result<TableSchema, StoreError> {
        self.tables
            .get(table)
            .map(|t| t.schema.clone())
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    fn check_required(schema: &TableSchema, rows: &[Row]) -> Result<(), StoreError> {
        for row in rows {
            for column in schema.required_columns() {
                if row.get(column).map_or(true, Value::is_null) {
                    return Err(StoreError::MissingColumn {
                        table: schema.name.to_string(),
                        column: column.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_references(&self, schema: &TableSchema, rows: &[Row]) -> Result<(), StoreError> {
        for fk in &schema.references {
            let target = self
                .tables
                .get(fk.table)
                .ok_or_else(|| StoreError::UnknownTable(fk.table.to_string()))?;
            let target_key = target.schema.primary_key;
            for row in rows {
                let Some(value) = row.get(fk.column) else { continue };
                if !target.rows.iter().any(|r| r.get(target_key) == Some(value)) {
                    return Err(StoreError::ForeignKey {
                        table: schema.name.to_string(),
                        column: fk.column.to_string(),
                        value: value.clone(),
                        target: fk.table.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_unique(table: &Table, rows: &[Row]) -> Result<(), StoreError> {
        let schema = &table.schema;
        for column in std::iter::once(schema.primary_key).chain(schema.unique.iter().copied()) {
            let mut seen: HashSet<String> = table
                .rows
                .iter()
                .filter_map(|r| r.get(column))
                .map(Value::to_string)
                .collect();
            for row in rows {
                let Some(value) = row.get(column).filter(|v| !v.is_null()) else { continue };
                if !seen.insert(value.to_string()) {
                    return Err(StoreError::Duplicate {
                        table: schema.name.to_string(),
                        column: column.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Remove matching rows from one table; returns them with the table's key column.
    fn remove_where(&self, table: &str, filter: &Filter) -> Result<(Vec<Row>, &'static str), StoreError> {
        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        let key = entry.schema.primary_key;
        let (removed, kept): (Vec<Row>, Vec<Row>) = std::mem::take(&mut entry.rows)
            .into_iter()
            .partition(|r| filter.matches(r));
        entry.rows = kept;
        Ok((removed, key))
    }

    /// Tables holding a cascading reference to `table`, with the referencing column.
    fn dependents(&self, table: &str) -> Vec<(String, &'static str)> {
        self.tables
            .iter()
            .flat_map(|t| {
                t.schema
                    .references
                    .iter()
                    .filter(|fk| fk.cascade && fk.table == table)
                    .map(|fk| (t.key().clone(), fk.column))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<usize, StoreError> {
        let schema = self.schema(table)?;
        Self::check_required(&schema, &rows)?;
        self.check_references(&schema, &rows)?;

        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        Self::check_unique(&entry, &rows)?;

        let count = rows.len();
        entry.rows.extend(rows);
        Ok(count)
    }

    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Row>, StoreError> {
        let entry = self
            .tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        Ok(entry.rows.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, StoreError> {
        let (removed, key) = self.remove_where(table, filter)?;
        let count = removed.len();

        let mut pending = vec![(table.to_string(), removed, key)];
        while let Some((parent, rows, parent_key)) = pending.pop() {
            let keys: Vec<Value> = rows.iter().filter_map(|r| r.get(parent_key).cloned()).collect();
            if keys.is_empty() {
                continue;
            }
            for (child, column) in self.dependents(&parent) {
                let mut entry = self
                    .tables
                    .get_mut(&child)
                    .ok_or_else(|| StoreError::UnknownTable(child.clone()))?;
                let child_key = entry.schema.primary_key;
                let (gone, kept): (Vec<Row>, Vec<Row>) = std::mem::take(&mut entry.rows)
                    .into_iter()
                    .partition(|r| r.get(column).is_some_and(|v| keys.contains(v)));
                entry.rows = kept;
                drop(entry);

                if !gone.is_empty() {
                    tracing::debug!(table = %child, parent = %parent, rows = gone.len(), "Cascade delete");
                    pending.push((child, gone, child_key));
                }
            }
        }

        Ok(count)
    }
}
