// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// labelsheet-document — the label sheet pipeline.
//
// Reads spreadsheet rows, renders an EAN-13 barcode per valid row, lays the
// label out 44 times on an A4 grid and serialises one page per row into a PDF.

pub mod barcode;
pub mod extract;
pub mod font;
pub mod layout;
pub mod pdf;

// Re-export the primary entry points so callers can use `labelsheet_document::RowExtractor` etc.
pub use barcode::{BarcodeRenderer, RasterBackend};
pub use extract::{RowExtractor, read_workbook};
pub use font::LabelFont;
pub use layout::LabelLayout;
pub use pdf::{DocumentSink, LabelSheetComposer, PdfSink, generate_pdf};
