// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spreadsheet reader — first worksheet of an XLSX/XLS/ODS workbook into rows.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use labelsheet_core::error::{LabelSheetError, Result};
use labelsheet_core::{Cell, TabularRow};
use tracing::{debug, info, instrument};

/// Read the first worksheet of a workbook held in memory.
///
/// Every cell is kept; blank rows are dropped so that only rows carrying data
/// reach extraction.
///
/// # Errors
///
/// `Extraction` when the bytes are not a readable workbook, the workbook has
/// no sheets, or the first sheet cannot be read.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<TabularRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|err| {
        LabelSheetError::Extraction(format!("failed to open workbook: {err}"))
    })?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LabelSheetError::Extraction("no sheet found".into()))?;

    let range = workbook.worksheet_range(&first).map_err(|err| {
        LabelSheetError::Extraction(format!("cannot read sheet '{first}': {err}"))
    })?;

    let rows = rows_from_range(&range);
    info!(sheet = %first, rows = rows.len(), "Workbook read");
    Ok(rows)
}

/// Convert a cell range into rows, skipping blank ones.
fn rows_from_range(range: &Range<Data>) -> Vec<TabularRow> {
    let rows: Vec<TabularRow> = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
        .map(TabularRow::new)
        .filter(|row| !row.is_blank())
        .collect();
    debug!(kept = rows.len(), total = range.height(), "Blank rows dropped");
    rows
}

/// Map a calamine value onto the text-or-number cell model.
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#ERR:{e:?}")),
    }
}
