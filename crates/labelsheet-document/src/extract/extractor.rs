// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Row extractor — filters spreadsheet rows to those carrying a valid
// identifier and pairs each with its rendered barcode.

use labelsheet_core::error::{LabelSheetError, Result};
use labelsheet_core::identifier;
use labelsheet_core::{ColumnLayout, ExtractionResult, LabelSheetConfig, TabularRow};
use tracing::{debug, error, info, instrument};

use crate::barcode::{BarcodeBackend, BarcodeRenderer, RasterBackend};

/// Extracts label rows from parsed spreadsheet data.
#[derive(Debug)]
pub struct RowExtractor<'a, B = RasterBackend> {
    columns: &'a ColumnLayout,
    renderer: &'a BarcodeRenderer<B>,
}

impl<'a, B: BarcodeBackend> RowExtractor<'a, B> {
    pub fn new(config: &'a LabelSheetConfig, renderer: &'a BarcodeRenderer<B>) -> Self {
        Self {
            columns: &config.columns,
            renderer,
        }
    }

    /// Whether a row is long enough and carries a valid identifier.
    fn is_label_row(&self, row: &TabularRow) -> bool {
        if row.is_blank() || row.len() < self.columns.min_columns {
            return false;
        }
        identifier::validate(&row.text(self.columns.identifier), self.renderer.policy())
    }

    /// Keep rows with a valid identifier and render one barcode per row.
    ///
    /// Row order is preserved. Rows are never modified.
    ///
    /// # Errors
    ///
    /// `Extraction` wrapping the barcode error when any kept row fails to
    /// render; no partial result is returned.
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn extract(&self, rows: &[TabularRow]) -> Result<ExtractionResult> {
        let kept: Vec<TabularRow> = rows
            .iter()
            .filter(|row| self.is_label_row(row))
            .cloned()
            .collect();
        debug!(
            kept = kept.len(),
            dropped = rows.len() - kept.len(),
            "Rows filtered"
        );

        let barcodes = kept
            .iter()
            .map(|row| {
                let code = row.text(self.columns.identifier);
                self.renderer.render(&code).map_err(|err| {
                    error!(%code, %err, "Barcode generation failed");
                    LabelSheetError::Extraction(format!("barcode generation failed: {err}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let result = ExtractionResult::new(kept, barcodes).ok_or_else(|| {
            LabelSheetError::Extraction("rows and barcodes are out of step".into())
        })?;
        info!(labels = result.len(), "Extraction complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use image::GrayImage;
    use labelsheet_core::{BarcodeSettings, Cell, IdentifierPolicy};

    use super::*;
    use crate::barcode::Symbology;

    /// Backend returning a fixed-size raster, or failing for one code.
    struct StubBackend {
        fail_on: Option<&'static str>,
    }

    impl BarcodeBackend for StubBackend {
        fn encode(&self, _: Symbology, text: &str, _: &BarcodeSettings) -> Result<GrayImage> {
            if self.fail_on == Some(text) {
                return Err(LabelSheetError::BarcodeGeneration("canvas unavailable".into()));
            }
            Ok(GrayImage::new(30, 10))
        }
    }

    fn row(cells: &[&str]) -> TabularRow {
        cells.iter().copied().collect()
    }

    fn stub(config: &LabelSheetConfig, fail_on: Option<&'static str>) -> BarcodeRenderer<StubBackend> {
        BarcodeRenderer::with_backend(StubBackend { fail_on }, config)
    }

    #[test]
    fn keeps_valid_rows_in_order() {
        let config = LabelSheetConfig::default();
        let renderer = stub(&config, None);
        let rows = vec![
            row(&["B-2", "Bolt", "4901234567894", "490123456789", "002"]),
            row(&["X", "Short", "4901234567894"]),
            row(&["", "", "", "", ""]),
            row(&["A-1", "Nut", "5901234123457", "590123412345", "001"]),
        ];

        let result = RowExtractor::new(&config, &renderer).extract(&rows).unwrap();
        assert!(result.has_valid_data());
        assert_eq!(result.len(), 2);
        assert_eq!(result.barcodes().len(), result.rows().len());
        assert_eq!(result.rows()[0].text(0), "B-2");
        assert_eq!(result.rows()[1].text(0), "A-1");
        assert!(result.rows().iter().all(|r| r.len() >= config.columns.min_columns));
    }

    #[test]
    fn wrong_length_identifier_is_dropped_silently() {
        let config = LabelSheetConfig::default();
        let renderer = stub(&config, None);
        let rows = vec![
            row(&["A-1", "Nut", "12345", "", ""]),
            row(&["A-2", "Washer", "4901234567894", "", ""]),
        ];

        let result = RowExtractor::new(&config, &renderer).extract(&rows).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].text(1), "Washer");
    }

    #[test]
    fn nothing_valid_is_not_an_error() {
        let config = LabelSheetConfig::default();
        let renderer = stub(&config, None);
        let rows = vec![row(&["A-1", "Nut", "12345", "", ""])];

        let result = RowExtractor::new(&config, &renderer).extract(&rows).unwrap();
        assert!(!result.has_valid_data());
        assert!(result.barcodes().is_empty());

        let empty = RowExtractor::new(&config, &renderer).extract(&[]).unwrap();
        assert!(!empty.has_valid_data());
    }

    #[test]
    fn one_render_failure_aborts_the_batch() {
        let config = LabelSheetConfig::default();
        let renderer = stub(&config, Some("5901234123457"));
        let rows = vec![
            row(&["A-1", "Nut", "4901234567894", "", ""]),
            row(&["A-2", "Bolt", "5901234123457", "", ""]),
        ];

        let err = RowExtractor::new(&config, &renderer).extract(&rows).unwrap_err();
        match err {
            LabelSheetError::Extraction(msg) => assert!(msg.contains("canvas unavailable")),
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[test]
    fn check_digit_mismatch_aborts_the_batch() {
        let config = LabelSheetConfig::default();
        let renderer = stub(&config, None);
        let rows = vec![row(&["A-1", "Nut", "4901234567890", "", ""])];

        let result = RowExtractor::new(&config, &renderer).extract(&rows);
        assert!(matches!(result, Err(LabelSheetError::Extraction(_))));
    }

    #[test]
    fn numeric_payload_column_with_computed_check_digit() {
        let mut config = LabelSheetConfig {
            policy: IdentifierPolicy::ComputeCheckDigit,
            ..LabelSheetConfig::default()
        };
        config.columns.identifier = 5;
        config.columns.min_columns = 6;
        let renderer = stub(&config, None);
        let rows = vec![
            TabularRow::new(vec![
                Cell::from("ABC-001"),
                Cell::from("Widget"),
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Number(490123456789.0),
            ]),
            row(&["ABC-002", "Gadget", "", "", "", "12345"]),
        ];

        let result = RowExtractor::new(&config, &renderer).extract(&rows).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].text(0), "ABC-001");
    }
}
