// Extraction pipeline: read the dump, resolve the column schema, locate and
// tokenize every tuple, project the wanted fields and write one JSON array.
// Only schema resolution and I/O can fail the run; per-row problems are
// counted and logged.

use crate::error::ExtractError;
use crate::parser::locator::{LocatorMode, RowLocator};
use crate::parser::row::tokenize_row;
use crate::parser::schema::SchemaParser;
use crate::progress::ProgressManager;
use crate::projector::{FieldProjector, Record};
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const LOG_EVERY_ROWS: usize = 1000;

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub table: String,
    pub fields: Vec<String>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub locator: LocatorMode,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub rows_found: usize,
    pub rows_parsed: usize,
    pub rows_dropped: usize,
    pub unbalanced_rows: usize,
    pub unmapped_fields: Vec<String>,
}

#[derive(Debug)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub summary: Summary,
}

pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    // Full run: input file -> output file.
    pub fn run(&self, progress: &ProgressManager) -> Result<Summary, ExtractError> {
        let input = &self.config.input;
        tracing::debug!(path = %input.display(), "Extract: reading dump");
        let read_start = Instant::now();
        let bytes = fs::read(input).map_err(|e| ExtractError::io(input, e))?;
        // Undecodable bytes become U+FFFD instead of failing the run.
        let text = String::from_utf8_lossy(&bytes);
        tracing::debug!(
            bytes = bytes.len(),
            elapsed = ?read_start.elapsed(),
            "Extract: dump loaded"
        );

        let bar = progress.new_dump_bar(text.len() as u64, "Parsing rows");
        let extraction = self.extract_text(&text, bar.as_ref())?;
        if let Some(b) = bar {
            b.finish_and_clear();
        }

        if let Some(first) = extraction.records.first() {
            if tracing::enabled!(tracing::Level::DEBUG) {
                let sample = serde_json::to_string_pretty(first)?;
                tracing::debug!("Extract: sample record\n{}", sample);
            }
        }

        write_records(&self.config.output, &extraction.records)?;
        tracing::info!(
            records = extraction.records.len(),
            path = %self.config.output.display(),
            "Extract: wrote JSON output"
        );
        Ok(extraction.summary)
    }

    // Core pass over in-memory dump text; no file I/O.
    pub fn extract_text(
        &self,
        text: &str,
        bar: Option<&ProgressBar>,
    ) -> Result<Extraction, ExtractError> {
        let headers = SchemaParser::new(&self.config.table).extract(text)?;
        tracing::info!(
            table = %self.config.table,
            columns = headers.schema.len(),
            statements = headers.values_offsets.len(),
            "Extract: column schema resolved"
        );

        let projector = FieldProjector::new(&headers.schema, &self.config.fields);
        tracing::debug!(
            fields = ?projector.mapped_fields().collect::<Vec<_>>(),
            "Extract: projecting fields"
        );
        let mut summary = Summary {
            unmapped_fields: projector.unmapped().to_vec(),
            ..Summary::default()
        };
        let mut records = Vec::new();

        for raw in RowLocator::new(text, &headers.values_offsets, self.config.locator) {
            summary.rows_found += 1;
            if let Some(b) = bar {
                b.set_position(raw.end as u64);
            } else if summary.rows_found % LOG_EVERY_ROWS == 0 {
                tracing::debug!(rows = summary.rows_found, "Extract: rows processed");
            }

            let row = tokenize_row(raw.body);
            if row.unbalanced {
                summary.unbalanced_rows += 1;
                tracing::warn!(
                    row = summary.rows_found,
                    offset = raw.end,
                    "unbalanced quote in row; tokenized best-effort"
                );
            }

            match projector.project(&row.values) {
                Ok(record) => {
                    records.push(record);
                    summary.rows_parsed += 1;
                }
                Err(e) => {
                    summary.rows_dropped += 1;
                    tracing::debug!(row = summary.rows_found, "Extract: skip row ({})", e);
                }
            }
        }

        tracing::info!(
            found = summary.rows_found,
            parsed = summary.rows_parsed,
            dropped = summary.rows_dropped,
            "Extract: row pass finished"
        );
        Ok(Extraction { records, summary })
    }
}

// Pretty-printed JSON array; serde_json keeps non-ASCII text literal.
fn write_records(path: &Path, records: &[Record]) -> Result<(), ExtractError> {
    let file = File::create(path).map_err(|e| ExtractError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| ExtractError::io(path, e))
}
