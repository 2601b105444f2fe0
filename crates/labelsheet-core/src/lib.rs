// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label sheet — core types, configuration, identifier rules and error
// definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod identifier;
pub mod types;

pub use config::{
    BarcodeSettings, ColumnLayout, IdentifierPolicy, LabelSheetConfig, LayoutConstants,
};
pub use error::LabelSheetError;
pub use identifier::Identifier;
pub use types::*;
