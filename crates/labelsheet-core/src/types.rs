// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the label sheet pipeline.

use serde::{Deserialize, Serialize};

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Blank cells are empty or hold an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl Cell {
    /// Whether the cell prints nothing on a label: blank, zero or NaN.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Number(value) => *value == 0.0 || value.is_nan(),
            other => other.is_blank(),
        }
    }
}

impl std::fmt::Display for Cell {
    /// Integral numbers print without a fraction, so a numeric identifier
    /// cell reads back as its digits.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// An ordered, immutable row of cells as read from the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabularRow(Vec<Cell>);

impl TabularRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the row has no cells or every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(Cell::is_blank)
    }

    /// Text of the cell at `index`; missing cells read as "".
    pub fn text(&self, index: usize) -> String {
        self.0.get(index).map(Cell::to_string).unwrap_or_default()
    }

    /// Text printed on a label for the cell at `index`.
    ///
    /// Like [`text`](Self::text), except that numeric zero and NaN print as "".
    pub fn label_text(&self, index: usize) -> String {
        match self.0.get(index) {
            Some(cell) if !cell.is_falsy() => cell.to_string(),
            _ => String::new(),
        }
    }
}

impl<C: Into<Cell>> FromIterator<C> for TabularRow {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A rendered barcode: PNG bytes plus pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl BarcodeImage {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Rows that passed extraction, each paired with its barcode by index.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    rows: Vec<TabularRow>,
    barcodes: Vec<BarcodeImage>,
}

impl ExtractionResult {
    /// Pair rows with their barcodes. Returns `None` when the lengths differ.
    pub fn new(rows: Vec<TabularRow>, barcodes: Vec<BarcodeImage>) -> Option<Self> {
        (rows.len() == barcodes.len()).then_some(Self { rows, barcodes })
    }

    pub fn rows(&self) -> &[TabularRow] {
        &self.rows
    }

    pub fn barcodes(&self) -> &[BarcodeImage] {
        &self.barcodes
    }

    /// Iterate rows together with their barcode.
    pub fn labels(&self) -> impl Iterator<Item = (&TabularRow, &BarcodeImage)> {
        self.rows.iter().zip(&self.barcodes)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// At least one row survived extraction.
    pub fn has_valid_data(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_print_as_digits() {
        assert_eq!(Cell::Number(4901234567894.0).to_string(), "4901234567894");
        assert_eq!(Cell::Number(1.5).to_string(), "1.5");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn blank_rows() {
        let row: TabularRow = ["", ""].into_iter().collect();
        assert!(row.is_blank());
        assert!(TabularRow::default().is_blank());
        let row = TabularRow::new(vec![Cell::Empty, Cell::Number(0.0)]);
        assert!(!row.is_blank());
    }

    #[test]
    fn missing_cells_read_empty() {
        let row: TabularRow = ["A"].into_iter().collect();
        assert_eq!(row.text(0), "A");
        assert_eq!(row.text(4), "");
    }

    #[test]
    fn label_text_drops_zero_and_nan() {
        let row = TabularRow::new(vec![
            Cell::Number(0.0),
            Cell::Number(f64::NAN),
            Cell::Number(7.0),
            Cell::from("0"),
            Cell::Empty,
        ]);
        assert_eq!(row.text(0), "0");
        assert_eq!(row.label_text(0), "");
        assert_eq!(row.label_text(1), "");
        assert_eq!(row.label_text(2), "7");
        // A "0" typed as text is still printed.
        assert_eq!(row.label_text(3), "0");
        assert_eq!(row.label_text(4), "");
        assert_eq!(row.label_text(9), "");
    }

    #[test]
    fn extraction_result_requires_alignment() {
        assert!(ExtractionResult::new(vec![TabularRow::default()], Vec::new()).is_none());
        let empty = ExtractionResult::new(Vec::new(), Vec::new()).unwrap();
        assert!(!empty.has_valid_data());
    }
}
