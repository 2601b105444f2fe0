// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the label sheet pipeline.

use thiserror::Error;

/// Top-level error type for all label sheet operations.
///
/// The three pipeline kinds are fatal to their enclosing operation: nothing
/// is retried and no partial result is returned.
#[derive(Debug, Error)]
pub enum LabelSheetError {
    // -- Pipeline errors --
    /// The spreadsheet had no usable sheet, or a barcode failed during a
    /// batch extraction.
    #[error("spreadsheet processing failed: {0}")]
    Extraction(String),

    /// An identifier failed validation or could not be rasterized.
    #[error("barcode generation failed: {0}")]
    BarcodeGeneration(String),

    /// Font embedding, image embedding, drawing or serialization failed.
    #[error("PDF generation failed: {0}")]
    DocumentGeneration(String),

    // -- Caller surface --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelSheetError>;
