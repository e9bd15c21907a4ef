//! CSV projection of a record list
//!
//! Columns are the keys of the first record, in order. Cells are the raw
//! stored values, not the display formatting.

use super::normalize::raw_text;
use contracts::shared::record::Record;
use csv::{Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

pub const CSV_MIME_TYPE: &str = "text/csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer: {0}")]
    Buffer(String),

    #[error("csv output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Downloadable artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Serialize records as comma-separated text with a header row.
/// Cells are quoted only when they contain a comma, a quote or a line break.
/// An empty list gives an empty string.
pub fn to_csv(records: &[&Record]) -> Result<String, ExportError> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let header: Vec<&String> = first.keys().collect();

    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header.iter().map(|h| h.as_str()))?;
    for record in records {
        writer.write_record(header.iter().map(|field| raw_text(record.get(field))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Build the CSV artifact for `records`; refuses an empty list
pub fn export_csv(records: &[&Record], filename: &str) -> Result<CsvExport, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }
    let content = to_csv(records)?;
    info!(filename, rows = records.len(), bytes = content.len(), "csv export built");
    Ok(CsvExport {
        filename: filename.to_string(),
        mime_type: CSV_MIME_TYPE,
        content,
    })
}
