// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction module — workbook reading and label row filtering.

pub mod extractor;
pub mod spreadsheet;

pub use extractor::RowExtractor;
pub use spreadsheet::read_workbook;
