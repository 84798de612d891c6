//! Reading time entries from timesheet exports.
//!
//! CSV files are read with the `csv` crate; spreadsheet workbooks (`.xlsx`,
//! `.xlsm`, `.xlsb`, `.xls`, `.ods`) with `calamine`. Columns are located by
//! header name, so column order does not matter and extra columns are
//! ignored.

use std::path::Path;
use std::str::FromStr;

use calamine::{Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::debug;

use crate::error::{SummaryError, SummaryResult};
use crate::models::{RawEntry, RawRate};

/// Columns every timesheet export must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Last Name",
    "First Name",
    "Dist Job Desc",
    "Dist Activity Code",
    "Dist Activity Desc",
    "Date",
    "Earning Desc",
    "Hours",
    "Rate",
];

const LAST_NAME: usize = 0;
const FIRST_NAME: usize = 1;
const JOB_DESC: usize = 2;
const ACTIVITY_CODE: usize = 3;
const ACTIVITY_DESC: usize = 4;
const DATE: usize = 5;
const EARNING_DESC: usize = 6;
const HOURS: usize = 7;
const RATE: usize = 8;

/// The kind of file an export is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma separated values.
    Csv,
    /// A spreadsheet workbook.
    Spreadsheet,
}

impl InputFormat {
    /// Picks the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> SummaryResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(InputFormat::Spreadsheet),
            _ => Err(SummaryError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Reads all time entries from a CSV file or spreadsheet.
///
/// `sheet` selects a worksheet by name; the first worksheet is used when it
/// is `None`. It is ignored for CSV input.
///
/// # Errors
///
/// - `UnsupportedFormat` for an unknown extension
/// - `InputRead` if the file cannot be opened or decoded
/// - `SchemaError` if a required column is missing
/// - `ParseError` if an hours or date cell cannot be interpreted
pub fn read_entries(path: &Path, sheet: Option<&str>) -> SummaryResult<Vec<RawEntry>> {
    let source = path.display().to_string();
    let entries = match InputFormat::from_path(path)? {
        InputFormat::Csv => {
            let file = std::fs::File::open(path).map_err(|e| SummaryError::InputRead {
                path: source.clone(),
                message: e.to_string(),
            })?;
            read_csv_source(file, &source)?
        }
        InputFormat::Spreadsheet => read_spreadsheet(path, sheet)?,
    };

    debug!(path = %source, entries = entries.len(), "Read timesheet entries");
    Ok(entries)
}

/// Reads time entries from CSV data with a header row.
///
/// # Example
///
/// ```
/// use timesheet_summary::table::read_csv;
///
/// let data = "Last Name,First Name,Dist Job Desc,Dist Activity Code,Dist Activity Desc,Date,Earning Desc,Hours,Rate\n\
///             Doe,Jane,Plant Expansion,100;EXT,Exterior,2025-02-03,Regular,8,$25.00\n";
/// let entries = read_csv(data.as_bytes()).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].row, 2);
/// ```
pub fn read_csv<R: std::io::Read>(reader: R) -> SummaryResult<Vec<RawEntry>> {
    read_csv_source(reader, "CSV input")
}

fn read_csv_source<R: std::io::Read>(reader: R, source: &str) -> SummaryResult<Vec<RawEntry>> {
    let read_error = |e: csv::Error| SummaryError::InputRead {
        path: source.to_string(),
        message: e.to_string(),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().map_err(read_error)?.clone();
    let columns = ColumnMap::from_headers(headers.iter())?;

    let mut entries = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record.map_err(read_error)?;
        let row = record
            .position()
            .map_or(index + 2, |p| p.line() as usize);
        let cells: Vec<Cell<'_>> = record.iter().map(Cell::from_text).collect();
        if let Some(entry) = columns.entry(row, &cells)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn read_spreadsheet(path: &Path, sheet: Option<&str>) -> SummaryResult<Vec<RawEntry>> {
    let source = path.display().to_string();
    let read_error = |message: String| SummaryError::InputRead {
        path: source.clone(),
        message,
    };

    let mut workbook = calamine::open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| read_error(format!("worksheet '{name}': {e}")))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| read_error("workbook has no worksheets".to_string()))?
            .map_err(|e| read_error(e.to_string()))?,
    };

    // Absolute 0-based index of the header row within the sheet.
    let header_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(|c| Cell::from_data(c).to_text()).collect(),
        None => Vec::new(),
    };
    let columns = ColumnMap::from_headers(headers.iter().map(String::as_str))?;

    let mut entries = Vec::new();
    for (index, data) in rows.enumerate() {
        let cells: Vec<Cell<'_>> = data.iter().map(Cell::from_data).collect();
        if let Some(entry) = columns.entry(header_row + index + 2, &cells)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// A cell value, independent of the file it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell<'a> {
    Empty,
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
}

impl<'a> Cell<'a> {
    fn from_text(text: &'a str) -> Self {
        if text.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text)
        }
    }

    fn from_data(data: &'a Data) -> Self {
        match data {
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                excel_serial_to_date(serial).map_or(Cell::Number(serial), Cell::Date)
            }
            _ => Cell::Empty,
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn to_text(self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(f) => format_number(f),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMap {
    indices: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnMap {
    fn from_headers<'h, I>(headers: I) -> SummaryResult<Self>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let mut indices = [0; REQUIRED_COLUMNS.len()];

        for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| *h == column)
                .ok_or_else(|| SummaryError::SchemaError {
                    column: column.to_string(),
                })?;
        }
        Ok(Self { indices })
    }

    fn cell<'a>(&self, cells: &[Cell<'a>], column: usize) -> Cell<'a> {
        cells
            .get(self.indices[column])
            .copied()
            .unwrap_or(Cell::Empty)
    }

    fn text(&self, cells: &[Cell<'_>], column: usize) -> String {
        match self.cell(cells, column) {
            // Names and codes keep their exact text.
            Cell::Text(s) => s.to_string(),
            other => other.to_text(),
        }
    }

    /// Builds the entry for one data row; blank rows yield `None`.
    fn entry(&self, row: usize, cells: &[Cell<'_>]) -> SummaryResult<Option<RawEntry>> {
        if cells.iter().all(Cell::is_empty) {
            return Ok(None);
        }

        Ok(Some(RawEntry {
            row,
            last_name: self.text(cells, LAST_NAME),
            first_name: self.text(cells, FIRST_NAME),
            job_description: self.text(cells, JOB_DESC),
            activity_code: self.text(cells, ACTIVITY_CODE),
            activity_description: self.text(cells, ACTIVITY_DESC),
            date: parse_date_cell(self.cell(cells, DATE), row)?,
            earning_category: self.text(cells, EARNING_DESC),
            hours: parse_hours_cell(self.cell(cells, HOURS), row)?,
            rate: rate_cell(self.cell(cells, RATE)),
        }))
    }
}

fn parse_error(column: usize, value: String, row: usize) -> SummaryError {
    SummaryError::ParseError {
        column: REQUIRED_COLUMNS[column].to_string(),
        value,
        row,
    }
}

fn parse_date_cell(cell: Cell<'_>, row: usize) -> SummaryResult<NaiveDate> {
    match cell {
        Cell::Date(date) => Ok(date),
        Cell::Number(serial) => {
            excel_serial_to_date(serial).ok_or_else(|| parse_error(DATE, format_number(serial), row))
        }
        Cell::Text(text) => {
            parse_date_text(text).ok_or_else(|| parse_error(DATE, text.to_string(), row))
        }
        Cell::Empty => Err(parse_error(DATE, String::new(), row)),
    }
}

/// Parses the date formats timesheet exports use.
fn parse_date_text(text: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];
    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
    ];

    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Converts an Excel serial day number to a date.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Serial 2958465 is 9999-12-31, the last date Excel can represent.
    if !serial.is_finite() || !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn parse_hours_cell(cell: Cell<'_>, row: usize) -> SummaryResult<Decimal> {
    match cell {
        Cell::Empty => Ok(Decimal::ZERO),
        Cell::Number(hours) => {
            Decimal::from_f64(hours).ok_or_else(|| parse_error(HOURS, format_number(hours), row))
        }
        Cell::Text(text) => Decimal::from_str(text.trim())
            .map_err(|_| parse_error(HOURS, text.to_string(), row)),
        Cell::Date(date) => Err(parse_error(HOURS, date.to_string(), row)),
    }
}

fn rate_cell(cell: Cell<'_>) -> RawRate {
    match cell {
        Cell::Number(rate) => match Decimal::from_f64(rate) {
            Some(amount) => RawRate::Amount(amount),
            None => RawRate::Text(format_number(rate)),
        },
        other => RawRate::Text(other.to_text()),
    }
}

/// Renders a numeric cell as text; whole numbers print without a fraction.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
