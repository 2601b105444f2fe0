// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode renderer — validated identifier in, PNG barcode image out.

use labelsheet_core::error::{LabelSheetError, Result};
use labelsheet_core::{BarcodeImage, BarcodeSettings, Identifier, IdentifierPolicy, LabelSheetConfig};
use tracing::{debug, instrument};

use super::raster::{BarcodeBackend, RasterBackend, Symbology, encode_png};

/// Renders identifiers as barcode images with fixed settings.
///
/// The renderer never touches the filesystem or the network; every call
/// returns a fresh image buffer.
#[derive(Debug, Clone)]
pub struct BarcodeRenderer<B = RasterBackend> {
    backend: B,
    symbology: Symbology,
    settings: BarcodeSettings,
    policy: IdentifierPolicy,
}

impl BarcodeRenderer<RasterBackend> {
    /// Renderer using the default raster backend.
    pub fn new(config: &LabelSheetConfig) -> Self {
        Self::with_backend(RasterBackend::new(), config)
    }
}

impl<B: BarcodeBackend> BarcodeRenderer<B> {
    /// Renderer using a specific rasterization backend.
    pub fn with_backend(backend: B, config: &LabelSheetConfig) -> Self {
        Self {
            backend,
            symbology: Symbology::Ean13,
            settings: config.barcode.clone(),
            policy: config.policy,
        }
    }

    pub fn policy(&self) -> IdentifierPolicy {
        self.policy
    }

    /// Validate a raw identifier and render it.
    ///
    /// # Errors
    ///
    /// `BarcodeGeneration` when `raw` does not match the configured digit
    /// pattern (nothing is rasterized), or when rendering fails.
    pub fn render(&self, raw: &str) -> Result<BarcodeImage> {
        let identifier = Identifier::resolve(raw, self.policy).ok_or_else(|| {
            LabelSheetError::BarcodeGeneration(format!("invalid JAN code: {raw}"))
        })?;
        self.render_identifier(&identifier)
    }

    /// Render an identifier that already passed validation.
    #[instrument(skip(self), fields(code = %identifier))]
    pub fn render_identifier(&self, identifier: &Identifier) -> Result<BarcodeImage> {
        if !identifier.has_valid_check_digit() {
            return Err(LabelSheetError::BarcodeGeneration(format!(
                "check digit mismatch in JAN code: {identifier}"
            )));
        }

        let raster = self
            .backend
            .encode(self.symbology, identifier.as_str(), &self.settings)?;
        let (width, height) = raster.dimensions();
        let png = encode_png(&raster)?;

        debug!(width, height, png_len = png.len(), "Barcode rendered");
        Ok(BarcodeImage { png, width, height })
    }
}
