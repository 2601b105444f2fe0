// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document sink — the narrow drawing surface the composer writes to.

use labelsheet_core::error::Result;

use crate::font::LabelFont;
use crate::layout::{Frame, Point};

/// A paginated document under construction.
///
/// Resources are embedded once and referenced through the returned handles;
/// drawing always targets the page opened last. Coordinates are document
/// units with the origin at the bottom-left.
pub trait DocumentSink {
    /// Handle to an embedded font.
    type Font;
    /// Handle to an embedded image.
    type Image;

    fn embed_font(&mut self, font: &LabelFont) -> Result<Self::Font>;

    /// Embed a PNG image.
    fn embed_image(&mut self, png: &[u8]) -> Result<Self::Image>;

    /// Start a new page of the given physical size.
    fn new_page(&mut self, width_mm: f32, height_mm: f32);

    /// Stroke an unfilled rectangle.
    fn draw_rect(&mut self, frame: Frame, stroke_width: f32) -> Result<()>;

    /// Draw `text` with its baseline starting at `at`.
    fn draw_text(&mut self, text: &str, at: Point, font: &Self::Font, size: f32) -> Result<()>;

    /// Draw an embedded image stretched over `frame`.
    fn draw_image(&mut self, image: &Self::Image, frame: Frame) -> Result<()>;

    /// Advance width of `text` at `size`, in document units.
    fn measure_text(&self, text: &str, font: &Self::Font, size: f32) -> Result<f32>;

    /// Finish every page and produce the document bytes.
    fn serialize(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}
