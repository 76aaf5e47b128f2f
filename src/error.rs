// Error taxonomy for the extraction pipeline.
// SchemaNotFound, I/O and JSON failures abort a run. RowShapeMismatch and
// UnmappedField are recovered per row or per field and only show up in logs
// and the summary.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no INSERT header found for table `{table}`")]
    SchemaNotFound { table: String },

    #[error("row has {got} values, schema declares {expected} columns")]
    RowShapeMismatch { expected: usize, got: usize },

    #[error("column `{field}` is not declared in the INSERT header")]
    UnmappedField { field: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }

    // Errors that end the run, as opposed to per-row degradations.
    #[allow(dead_code)]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExtractError::RowShapeMismatch { .. } | ExtractError::UnmappedField { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_run_level_errors_are_fatal() {
        assert!(ExtractError::SchemaNotFound {
            table: "devices".to_string()
        }
        .is_fatal());
        assert!(ExtractError::io(
            "dump.sql",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
        )
        .is_fatal());
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(ExtractError::from(json_err).is_fatal());

        assert!(!ExtractError::RowShapeMismatch {
            expected: 3,
            got: 2
        }
        .is_fatal());
        assert!(!ExtractError::UnmappedField {
            field: "vds".to_string()
        }
        .is_fatal());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = ExtractError::SchemaNotFound {
            table: "devices".to_string(),
        };
        assert_eq!(err.to_string(), "no INSERT header found for table `devices`");

        let err = ExtractError::RowShapeMismatch {
            expected: 5,
            got: 4,
        };
        assert_eq!(err.to_string(), "row has 4 values, schema declares 5 columns");
    }
}
