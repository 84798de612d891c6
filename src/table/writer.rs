//! Writing the summary table.
//!
//! Summaries are written as an `.xlsx` workbook by default, or as CSV or
//! JSON.
//!
//! The summary is first written to a temporary file next to the destination
//! and only moved into place once the whole table has been written, so a
//! failed run never leaves a truncated or half-replaced summary behind.

use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{SummaryError, SummaryResult};
use crate::models::{SUMMARY_COLUMNS, SummaryRecord};

/// The format a summary is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// An `.xlsx` workbook with a single `Summary` worksheet.
    Xlsx,
    /// Comma separated values with a header row.
    Csv,
    /// A JSON array of objects keyed by column header.
    Json,
}

impl OutputFormat {
    /// Picks the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for anything other than `.xlsx`, `.csv`
    /// or `.json`.
    pub fn from_path(path: &Path) -> SummaryResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(SummaryError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Writes summary records to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `OutputWrite` if the temporary file cannot be created or written,
/// or cannot be moved over `path`. An existing file at `path` is left
/// untouched in that case.
pub fn write_summary(
    records: &[SummaryRecord],
    path: &Path,
    format: OutputFormat,
) -> SummaryResult<()> {
    let path_str = path.display().to_string();
    let write_error = |message: String| SummaryError::OutputWrite {
        path: path_str.clone(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
    let written = match format {
        OutputFormat::Xlsx => write_xlsx(records, &mut file),
        OutputFormat::Csv => write_csv(records, &mut file),
        OutputFormat::Json => write_json(records, &mut file),
    };
    written.map_err(|e| write_error(e.to_string()))?;

    file.persist(path)
        .map_err(|e| write_error(e.error.to_string()))?;

    info!(path = %path_str, rows = records.len(), format = ?format, "Wrote timesheet summary");
    Ok(())
}

/// Name of the worksheet holding the summary.
pub const SUMMARY_SHEET: &str = "Summary";

/// Writes records as an `.xlsx` workbook: the header row, then one row per
/// record. Every cell is written as text exactly as formatted.
pub fn write_xlsx<W: Write>(records: &[SummaryRecord], mut writer: W) -> std::io::Result<()> {
    let buffer = build_workbook(records).map_err(|e| std::io::Error::other(e.to_string()))?;
    writer.write_all(&buffer)?;
    writer.flush()
}

fn build_workbook(records: &[SummaryRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SUMMARY_SHEET)?;

    for (col, header) in SUMMARY_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (index, record) in records.iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, value) in record.values().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.save_to_buffer()
}

/// Writes records as CSV. The header row is written even with no records.
pub fn write_csv<W: Write>(records: &[SummaryRecord], writer: W) -> std::io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(SUMMARY_COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()
}

/// Writes records as a pretty-printed JSON array.
pub fn write_json<W: Write>(records: &[SummaryRecord], mut writer: W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
