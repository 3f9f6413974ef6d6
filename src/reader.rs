//! Roster readers
//!
//! * `.csv` – header row + data rows (empty lines skipped)
//! * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet, first row is the header

use crate::error::{Result, SeatPlanError};
use calamine::{open_workbook_auto, Data, Reader};
use seat_plan_common::RosterTable;
use std::path::Path;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Read a roster file into a table
///
/// Rows whose cells are all blank are kept; the partitioner drops them as
/// rows without a PRN so they show up in the filter counts.
pub fn read_roster(path: &Path) -> Result<RosterTable> {
    if !path.exists() {
        return Err(SeatPlanError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(path)?,
        e if SPREADSHEET_EXTENSIONS.contains(&e) => read_spreadsheet(path)?,
        _ => return Err(SeatPlanError::UnsupportedInput(path.display().to_string())),
    };

    log::debug!(
        "{}: {} column(s), {} row(s)",
        path.display(),
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

fn read_csv(path: &Path) -> Result<RosterTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(|c| c.to_string()).collect());
    }

    Ok(RosterTable::new(headers, rows))
}

fn read_spreadsheet(path: &Path) -> Result<RosterTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SeatPlanError::Spreadsheet("workbook has no worksheets".into()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(cell_text).map(|h| h.trim().to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|r| r.iter().map(cell_text).collect::<Vec<String>>())
        .collect();

    Ok(RosterTable::new(headers, rows))
}

/// Cell as text; integral floats lose the ".0" so long PRNs keep every digit
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", *f as i64)
        }
        other => other.to_string(),
    }
}
