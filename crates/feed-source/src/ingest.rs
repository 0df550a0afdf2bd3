//! Line ingestion and format detection.

use anyhow::{Context, Result};
use feed_core::{Record, Schema};
use serde_json::Value;
use std::io::BufRead;
use std::path::Path;

/// The detected encoding of an ingested file, fixed for the whole
/// table once decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// Every line is assumed to already be a well-formed JSON object.
    JsonLines,
    /// Every line is split on `;` and columns map onto schema fields.
    Delimited,
}

/// Detect the format from a single line.
///
/// A line that parses as a JSON object means JSON-lines; anything else
/// means delimited. Callers apply this to the first non-blank line
/// only — the decision is never re-evaluated per line.
pub fn detect_format(line: &str) -> LineFormat {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(_)) => LineFormat::JsonLines,
        _ => LineFormat::Delimited,
    }
}

/// An ordered table of raw data file lines plus the detected format.
#[derive(Debug, Clone)]
pub struct LineTable {
    lines: Vec<String>,
    format: LineFormat,
}

impl LineTable {
    /// Number of usable (non-blank) lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the table holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The format decided from the first non-blank line.
    pub fn format(&self) -> LineFormat {
        self.format
    }

    /// The raw line at `index`.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Build the wire body for the line at `index`.
    ///
    /// JSON-lines input is passed through verbatim; a line that no
    /// longer parses as JSON is still forwarded, with a warning, since
    /// the format decision is frozen. Delimited input is split on `;`
    /// and the i-th segment is mapped onto the i-th schema field name;
    /// missing trailing segments become empty strings.
    pub fn record_body(&self, index: usize, schema: &Schema) -> Option<String> {
        let line = self.lines.get(index)?;

        match self.format {
            LineFormat::JsonLines => {
                if serde_json::from_str::<Value>(line).is_err() {
                    tracing::warn!(
                        "Line {} is not valid JSON but the file was detected as JSON-lines; \
                         forwarding verbatim",
                        index + 1
                    );
                }
                Some(line.clone())
            }
            LineFormat::Delimited => {
                let mut columns = line.split(';');
                let mut record = Record::new();
                for field in &schema.fields {
                    let column = columns.next().unwrap_or("");
                    record.insert(field.name.clone(), Value::String(column.to_string()));
                }
                Some(Value::Object(record).to_string())
            }
        }
    }
}

/// A monotone position in a line table. Terminal once it reaches the
/// table length; there is no wraparound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayCursor {
    position: usize,
}

impl ReplayCursor {
    /// Create a cursor at the start of the table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance past the current line.
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Whether the cursor has consumed the whole table.
    pub fn is_exhausted(&self, table: &LineTable) -> bool {
        self.position >= table.len()
    }
}

/// Read a data file line by line, skipping blank lines, and build the
/// line table in file order.
pub fn ingest<R: BufRead>(reader: R) -> Result<LineTable> {
    let mut lines = Vec::new();
    let mut format = None;

    for line in reader.lines() {
        let line = line.context("Failed to read line from data file")?;
        if line.is_empty() {
            continue;
        }
        if format.is_none() {
            format = Some(detect_format(&line));
        }
        lines.push(line);
    }

    // A file with no usable lines never gets a format decision; the
    // table is empty so the choice is inert.
    let format = format.unwrap_or(LineFormat::JsonLines);

    tracing::debug!("Ingested {} lines as {:?}", lines.len(), format);

    Ok(LineTable { lines, format })
}

/// Ingest a data file from local storage.
pub fn ingest_file(path: impl AsRef<Path>) -> Result<LineTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open data file {path:?}"))?;
    ingest(std::io::BufReader::new(file))
}
