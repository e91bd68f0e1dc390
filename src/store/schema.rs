//! Table definitions and migrations.

/// A foreign key from one column to another table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub table: &'static str,
    /// Delete referencing rows when the referenced row is deleted.
    pub cascade: bool,
}

/// Constraints enforced by the store for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub unique: Vec<&'static str>,
    pub required: Vec<&'static str>,
    pub references: Vec<ForeignKey>,
}

impl TableSchema {
    pub fn new(name: &'static str, primary_key: &'static str) -> Self {
        Self {
            name,
            primary_key,
            unique: Vec::new(),
            required: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn unique(mut self, column: &'static str) -> Self {
        self.unique.push(column);
        self.required(column)
    }

    pub fn required(mut self, column: &'static str) -> Self {
        if !self.required.contains(&column) {
            self.required.push(column);
        }
        self
    }

    pub fn references(mut self, column: &'static str, table: &'static str, cascade: bool) -> Self {
        self.references.push(ForeignKey { column, table, cascade });
        self.required(column)
    }

    /// Primary key plus declared required columns.
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.primary_key).chain(self.required.iter().copied())
    }
}

pub const USERS: &str = "users";
pub const NOTES: &str = "notes";

/// Initial schema: users and their notes.
pub fn initial() -> Vec<TableSchema> {
    vec![
        TableSchema::new(USERS, "id")
            .unique("username")
            .required("createdAt"),
        TableSchema::new(NOTES, "id")
            .references("userId", USERS, true)
            .required("title"),
    ]
}
