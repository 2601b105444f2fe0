// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode rasterization — turns an encoded symbol into a grayscale image using
// `barcoders` for the module pattern and `image`/`imageproc` for drawing.

use ab_glyph::{FontRef, PxScale};
use barcoders::sym::ean13::EAN13;
use image::{GrayImage, ImageFormat, Luma};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use labelsheet_core::BarcodeSettings;
use labelsheet_core::error::{LabelSheetError, Result};
use tracing::{debug, instrument};

use crate::font::LabelFont;

const WHITE: Luma<u8> = Luma([255]);
const BLACK: Luma<u8> = Luma([0]);
/// Largest raster the backend will allocate.
const MAX_PIXELS: u64 = 64 * 1024 * 1024;

/// Linear symbologies the renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    /// EAN-13 / JAN-13.
    Ean13,
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbology::Ean13 => write!(f, "EAN-13"),
        }
    }
}

/// The rasterization capability the renderer depends on.
pub trait BarcodeBackend {
    /// Encode `text` as `symbology` and draw it with `settings`.
    fn encode(
        &self,
        symbology: Symbology,
        text: &str,
        settings: &BarcodeSettings,
    ) -> Result<GrayImage>;
}

/// Default backend: bars from `barcoders`, caption drawn with the label font.
#[derive(Debug, Clone, Default)]
pub struct RasterBackend {
    /// Font used for the human-readable digits.
    caption_font: LabelFont,
}

impl RasterBackend {
    /// Backend captioning with the bundled font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw captions with a different font.
    pub fn with_caption_font(mut self, font: LabelFont) -> Self {
        self.caption_font = font;
        self
    }

    /// Module pattern (1 = bar, 0 = space) for `text`.
    fn modules(symbology: Symbology, text: &str) -> Result<Vec<u8>> {
        match symbology {
            Symbology::Ean13 => {
                // barcoders derives the check digit from the 12-digit payload.
                let payload = text.get(..12).ok_or_else(|| {
                    LabelSheetError::BarcodeGeneration(format!("EAN-13 needs 13 digits: {text}"))
                })?;
                let barcode = EAN13::new(payload).map_err(|err| {
                    LabelSheetError::BarcodeGeneration(format!("EAN-13 encoding error: {err}"))
                })?;
                Ok(barcode.encode())
            }
        }
    }
}

impl BarcodeBackend for RasterBackend {
    #[instrument(skip(self, settings))]
    fn encode(
        &self,
        symbology: Symbology,
        text: &str,
        settings: &BarcodeSettings,
    ) -> Result<GrayImage> {
        let modules = Self::modules(symbology, text)?;

        let module_px = settings.px(settings.bar_width);
        let bar_height = settings.px(settings.height);
        let margin = settings.px(settings.margin);

        let caption_font = if settings.display_value {
            Some(FontRef::try_from_slice(self.caption_font.bytes()).map_err(|err| {
                LabelSheetError::BarcodeGeneration(format!("caption font is unusable: {err}"))
            })?)
        } else {
            None
        };
        let caption_band = if caption_font.is_some() {
            settings.px(settings.text_margin).saturating_add(settings.px(settings.font_size))
        } else {
            0
        };

        let (width, height) = canvas_size(modules.len(), module_px, margin, bar_height, caption_band)
            .ok_or_else(|| {
                LabelSheetError::BarcodeGeneration(format!(
                    "barcode raster too large for {} modules at {module_px}px",
                    modules.len()
                ))
            })?;
        let mut canvas = GrayImage::from_pixel(width, height, WHITE);

        for (index, _) in modules.iter().enumerate().filter(|(_, module)| **module == 1) {
            let x = margin + index as u32 * module_px;
            draw_filled_rect_mut(
                &mut canvas,
                Rect::at(x as i32, margin as i32).of_size(module_px, bar_height),
                BLACK,
            );
        }

        if let Some(font) = caption_font {
            let scale = PxScale::from(settings.px(settings.font_size) as f32);
            let (text_width, _) = text_size(scale, &font, text);
            let x = (width.saturating_sub(text_width) / 2) as i32;
            let y = (margin + bar_height + settings.px(settings.text_margin)) as i32;
            draw_text_mut(&mut canvas, BLACK, x, y, scale, &font, text);
        }

        debug!(width, height, modules = modules.len(), "Barcode rasterized");
        Ok(canvas)
    }
}

/// Canvas width and height, or `None` when the raster would exceed [`MAX_PIXELS`]
/// or overflow pixel coordinates.
fn canvas_size(
    modules: usize,
    module_px: u32,
    margin: u32,
    bar_height: u32,
    caption_band: u32,
) -> Option<(u32, u32)> {
    let quiet = margin.checked_mul(2)?;
    let width = u32::try_from(modules)
        .ok()?
        .checked_mul(module_px)?
        .checked_add(quiet)?;
    let height = quiet.checked_add(bar_height)?.checked_add(caption_band)?;
    // Drawing uses i32 coordinates.
    let drawable = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
    (drawable && u64::from(width) * u64::from(height) <= MAX_PIXELS).then_some((width, height))
}

/// Encode a grayscale raster as PNG bytes.
pub(crate) fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, ImageFormat::Png).map_err(|err| {
        LabelSheetError::BarcodeGeneration(format!("PNG encoding failed: {err}"))
    })?;
    Ok(buffer)
}
