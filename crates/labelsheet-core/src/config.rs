// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label sheet configuration.
//
// Built once at start-up and passed by reference into every component. The
// page size and grid are fixed constants; everything else has production
// defaults that a deployment may pin in a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LabelSheetError, Result};

/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Label containers per grid row.
pub const GRID_COLUMNS: usize = 4;
/// Grid rows per page.
pub const GRID_ROWS: usize = 11;
/// Labels on every page.
pub const CONTAINERS_PER_PAGE: usize = GRID_COLUMNS * GRID_ROWS;

/// File name offered for the generated document.
pub const OUTPUT_FILENAME: &str = "data_confirmation.pdf";
/// MIME type of the generated document.
pub const OUTPUT_MIME_TYPE: &str = "application/pdf";
/// Title written into the PDF metadata.
pub const DOCUMENT_TITLE: &str = "Label Sheet (44 labels)";

/// How identifier cells are turned into a 13-digit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierPolicy {
    /// Cells already hold the full 13 digits, check digit included.
    #[default]
    FullLength,
    /// Cells hold the 12-digit payload; the check digit is computed.
    ComputeCheckDigit,
}

impl IdentifierPolicy {
    /// Number of digits a cell must contain under this policy.
    pub fn expected_len(&self) -> usize {
        match self {
            Self::FullLength => 13,
            Self::ComputeCheckDigit => 12,
        }
    }
}

/// Which spreadsheet columns feed which part of a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Column holding the identifier encoded into the barcode.
    pub identifier: usize,
    /// Rows with fewer cells are dropped.
    pub min_columns: usize,
    /// Column drawn left-aligned next to the barcode.
    pub leading_code: usize,
    /// Columns drawn as centred lines, top to bottom (at most four).
    pub centered: Vec<usize>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            identifier: 2,
            min_columns: 5,
            leading_code: 0,
            centered: vec![1, 2, 3, 4],
        }
    }
}

/// Rasterization parameters for the barcode symbol.
///
/// Sizes are in base pixels; the renderer multiplies them by `resolution`
/// and rounds so that fractional bar widths still produce crisp bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeSettings {
    /// Width of one barcode module.
    pub bar_width: f32,
    /// Height of the bars.
    pub height: f32,
    /// Size of the human-readable digits beneath the bars.
    pub font_size: f32,
    /// Quiet zone around the whole symbol.
    pub margin: f32,
    /// Gap between the bars and the digits.
    pub text_margin: f32,
    /// Draw the human-readable digits beneath the bars.
    pub display_value: bool,
    /// Supersampling factor applied to every size above.
    pub resolution: u32,
}

impl Default for BarcodeSettings {
    fn default() -> Self {
        Self {
            bar_width: 2.4,
            height: 100.0,
            font_size: 30.0,
            margin: 2.0,
            text_margin: 4.0,
            display_value: true,
            resolution: 5,
        }
    }
}

impl BarcodeSettings {
    /// Upper bound for every base size.
    pub const MAX_BASE_SIZE: f32 = 1000.0;
    /// Upper bound for the supersampling factor.
    pub const MAX_RESOLUTION: u32 = 16;

    /// Scale a base size to output pixels (never below one pixel).
    pub fn px(&self, base: f32) -> u32 {
        ((base * self.resolution as f32).round() as u32).max(1)
    }

    fn validate(&self) -> Result<()> {
        let sizes = [
            ("bar_width", self.bar_width, false),
            ("height", self.height, false),
            ("font_size", self.font_size, false),
            ("margin", self.margin, true),
            ("text_margin", self.text_margin, true),
        ];
        for (name, value, zero_ok) in sizes {
            let above_min = if zero_ok { value >= 0.0 } else { value > 0.0 };
            if !(above_min && value <= Self::MAX_BASE_SIZE) {
                return Err(LabelSheetError::Config(format!(
                    "barcode {name} must be in {}0, {}], got {value}",
                    if zero_ok { "[" } else { "(" },
                    Self::MAX_BASE_SIZE
                )));
            }
        }
        if !(1..=Self::MAX_RESOLUTION).contains(&self.resolution) {
            return Err(LabelSheetError::Config(format!(
                "barcode resolution must be in 1..={}, got {}",
                Self::MAX_RESOLUTION,
                self.resolution
            )));
        }
        Ok(())
    }
}

/// Physical geometry of the label grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConstants {
    /// Container width (mm).
    pub container_width_mm: f32,
    /// Container height (mm).
    pub container_height_mm: f32,
    /// Distance from the left page edge to the first column (mm).
    pub margin_left_mm: f32,
    /// Distance from the top page edge to the first row (mm).
    pub margin_top_mm: f32,
    /// Document units (points) per millimetre.
    pub mm_to_units: f32,
    /// Inner margin used for the code line and the barcode (mm).
    pub text_margin_mm: f32,
    /// Distance between text baselines (mm).
    pub line_height_mm: f32,
    /// Extra downward shift applied to every centred line (mm).
    pub baseline_offset_mm: f32,
    /// Label text size (pt).
    pub font_size: f32,
    /// Border stroke width (pt).
    pub border_width: f32,
    /// Barcode height as a fraction of the container height.
    pub barcode_height_scale: f32,
    /// Line-height multiples between the container top and the code line.
    pub code_line_offset: f32,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            container_width_mm: 48.3,
            container_height_mm: 25.4,
            margin_left_mm: 8.4,
            margin_top_mm: 8.8,
            mm_to_units: 2.83465,
            text_margin_mm: 2.0,
            line_height_mm: 2.5,
            baseline_offset_mm: 0.5,
            font_size: 6.0,
            border_width: 0.5,
            barcode_height_scale: 0.5,
            code_line_offset: 6.0,
        }
    }
}

/// Complete configuration for one deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSheetConfig {
    pub policy: IdentifierPolicy,
    pub columns: ColumnLayout,
    pub barcode: BarcodeSettings,
    pub layout: LayoutConstants,
}

impl LabelSheetConfig {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a sheet.
    pub fn validate(&self) -> Result<()> {
        let columns = &self.columns;
        if columns.centered.len() > 4 {
            return Err(LabelSheetError::Config(format!(
                "at most 4 centred columns are supported, got {}",
                columns.centered.len()
            )));
        }
        let highest = columns
            .centered
            .iter()
            .copied()
            .chain([columns.identifier, columns.leading_code])
            .max()
            .unwrap_or(0);
        if columns.min_columns <= highest {
            return Err(LabelSheetError::Config(format!(
                "min_columns ({}) must exceed every used column index (highest is {})",
                columns.min_columns, highest
            )));
        }
        let scale = self.layout.barcode_height_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(LabelSheetError::Config(format!(
                "barcode_height_scale must be in (0, 1], got {scale}"
            )));
        }
        self.barcode.validate()
    }
}
