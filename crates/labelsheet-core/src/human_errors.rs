// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for whoever prints the labels.
//
// Every pipeline failure is fatal to its operation, so each message tells the
// user what to fix before re-running the whole job from scratch.

use crate::error::LabelSheetError;

/// Shown when the failure is not one of ours.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Which stage the user has to repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryFrom {
    /// Fix or re-select the spreadsheet and load it again.
    Upload,
    /// The data was fine; run generation again.
    Generate,
    /// Fix the configuration or command line first.
    Setup,
}

/// A human-readable error with a message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as the heading).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Where to restart.
    pub retry_from: RetryFrom,
}

/// Convert a `LabelSheetError` into a `HumanError`.
pub fn humanize_error(err: &LabelSheetError) -> HumanError {
    match err {
        LabelSheetError::Extraction(detail) => HumanError {
            message: "An error occurred while processing the spreadsheet.".into(),
            suggestion: format!(
                "Check that the first sheet holds one product per row and a valid JAN code in the code column. ({detail})"
            ),
            retry_from: RetryFrom::Upload,
        },

        LabelSheetError::BarcodeGeneration(detail) => HumanError {
            message: "A barcode could not be created.".into(),
            suggestion: format!("Correct the product code and try again. ({detail})"),
            retry_from: RetryFrom::Upload,
        },

        LabelSheetError::DocumentGeneration(detail) => HumanError {
            message: format!("Failed to generate the PDF: {detail}"),
            suggestion: "If a custom font is configured, make sure it is a valid TrueType or OpenType file, then generate again.".into(),
            retry_from: RetryFrom::Generate,
        },

        LabelSheetError::Config(detail) => HumanError {
            message: "The label configuration is not usable.".into(),
            suggestion: format!("Fix the configuration file and try again. ({detail})"),
            retry_from: RetryFrom::Setup,
        },

        LabelSheetError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retry_from: RetryFrom::Upload,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "No permission to read or write that file.".into(),
                    suggestion: "Check the file permissions, or choose a different location.".into(),
                    retry_from: RetryFrom::Setup,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    retry_from: RetryFrom::Generate,
                }
            }
        }

        LabelSheetError::Serialization(_) => HumanError {
            message: "The configuration file is not valid JSON.".into(),
            suggestion: "Fix the syntax of the configuration file and try again.".into(),
            retry_from: RetryFrom::Setup,
        },
    }
}

/// Fallback for failures that are not a `LabelSheetError`.
pub fn humanize_unknown(err: &(dyn std::error::Error + 'static)) -> HumanError {
    match err.downcast_ref::<LabelSheetError>() {
        Some(known) => humanize_error(known),
        None => HumanError {
            message: UNKNOWN_ERROR_MESSAGE.into(),
            suggestion: format!("Try the whole operation again. (Detail: {err})"),
            retry_from: RetryFrom::Upload,
        },
    }
}
