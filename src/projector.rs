// Field projector: reduces a typed row to the caller's wanted fields.
// Field positions are resolved once against the column schema; wanted fields
// the schema does not declare are reported at construction and left out of
// every record.

use crate::error::ExtractError;
use crate::parser::{ColumnSchema, SqlValue};
use indexmap::IndexMap;

// Keys keep the wanted-field order.
pub type Record = IndexMap<String, SqlValue>;

#[derive(Debug, Clone)]
pub struct FieldProjector {
    mapping: Vec<(String, usize)>,
    unmapped: Vec<String>,
    width: usize,
}

impl FieldProjector {
    pub fn new(schema: &ColumnSchema, wanted: &[String]) -> Self {
        let mut mapping: Vec<(String, usize)> = Vec::with_capacity(wanted.len());
        let mut unmapped = Vec::new();

        for field in wanted {
            if mapping.iter().any(|(name, _)| name == field) || unmapped.contains(field) {
                continue;
            }
            match schema.position(field) {
                Some(pos) => mapping.push((field.clone(), pos)),
                None => {
                    tracing::warn!(
                        "{}",
                        ExtractError::UnmappedField {
                            field: field.clone()
                        }
                    );
                    unmapped.push(field.clone());
                }
            }
        }

        tracing::debug!(
            mapped = mapping.len(),
            unmapped = unmapped.len(),
            "FieldProjector: mapped wanted fields"
        );

        Self {
            mapping,
            unmapped,
            width: schema.len(),
        }
    }

    pub fn unmapped(&self) -> &[String] {
        &self.unmapped
    }

    pub fn mapped_fields(&self) -> impl Iterator<Item = &str> {
        self.mapping.iter().map(|(name, _)| name.as_str())
    }

    // Rows shorter than the schema are rejected; the caller drops them.
    pub fn project(&self, row: &[SqlValue]) -> Result<Record, ExtractError> {
        if row.len() < self.width {
            return Err(ExtractError::RowShapeMismatch {
                expected: self.width,
                got: row.len(),
            });
        }
        Ok(self
            .mapping
            .iter()
            .map(|(name, pos)| (name.clone(), row[*pos].clone()))
            .collect())
    }
}
