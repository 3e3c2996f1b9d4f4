//! In-memory tables available to a level.

use serde::Serialize;

use crate::value::Row;

/// A named table: an ordered sequence of rows sharing one column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    name: String,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table.
    ///
    /// All rows are expected to list the same columns; see [`Table::is_uniform`].
    #[must_use]
    pub fn new(name: &str, rows: Vec<Row>) -> Self {
        let table = Self {
            name: String::from(name),
            rows,
        };
        debug_assert!(table.is_uniform(), "table '{name}' has mixed column sets");
        table
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows in storage order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column names, taken from the first row.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.columns().collect())
            .unwrap_or_default()
    }

    /// Returns true if every row shares the first row's column set.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        match self.rows.split_first() {
            Some((first, rest)) => rest.iter().all(|row| row.same_columns(first)),
            None => true,
        }
    }
}

/// A set of tables, looked up by name.
///
/// Table order is preserved so previews list tables the way they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    tables: Vec<Table>,
}

impl Dataset {
    /// Creates an empty dataset.
    #[must_use]
    pub const fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds a table, builder style.
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Looks up a table by exact name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns true if a table with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    /// All tables in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Table names in declaration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(Table::name)
    }
}
