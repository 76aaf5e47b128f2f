// Parser module: INSERT header (column schema), tuple location, row tokenizing
// and literal typing.

pub mod locator;
pub mod row;
pub mod schema;
pub mod value;

use std::collections::HashMap;

// One typed SQL literal. Serializes untagged so JSON output carries plain
// null / string / number values.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
}

// Ordered column names from an INSERT header plus a name -> position index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnSchema {
    // Duplicate names keep their first position.
    pub fn new(columns: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            positions.entry(col.clone()).or_insert(i);
        }
        Self { columns, positions }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}
