// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF sink — a `DocumentSink` backed by `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Fonts and images are registered on the document once
// and referenced by id from every page; fonts are subset on save.

use std::collections::HashSet;

use labelsheet_core::error::{LabelSheetError, Result};
use printpdf::{
    Color, FontId, Line, LinePoint, Mm, Op, ParsedFont, PdfDocument, PdfPage,
    PdfSaveOptions, PdfWarnMsg, Point as PdfPoint, Pt, RawImage, RawImageData, RawImageFormat, Rgb,
    TextItem, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use super::sink::DocumentSink;
use crate::font::LabelFont;
use crate::layout::{Frame, Point};

/// Font handle returned by [`PdfSink::embed_font`].
#[derive(Debug)]
pub struct PdfFont {
    id: FontId,
    /// Kept for glyph advance and coverage lookups.
    font: LabelFont,
}

/// Image handle returned by [`PdfSink::embed_image`].
#[derive(Debug, Clone)]
pub struct PdfImage {
    id: XObjectId,
    width: u32,
    height: u32,
}

/// Page being drawn: size plus accumulated operations.
struct OpenPage {
    width: Mm,
    height: Mm,
    ops: Vec<Op>,
}

/// Builds a PDF in memory.
pub struct PdfSink {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    current: Option<OpenPage>,
    /// Texts already checked for glyph coverage.
    checked: HashSet<String>,
}

impl PdfSink {
    /// Create an empty document with the given metadata title.
    pub fn new(title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            current: None,
            checked: HashSet::new(),
        }
    }

    fn ops(&mut self) -> Result<&mut Vec<Op>> {
        self.current
            .as_mut()
            .map(|page| &mut page.ops)
            .ok_or_else(|| LabelSheetError::DocumentGeneration("drawing before any page".into()))
    }

    /// Warn once per distinct text about characters the font cannot show.
    fn check_coverage(&mut self, text: &str, font: &PdfFont) {
        if self.checked.contains(text) {
            return;
        }
        let missing = font.font.missing_glyphs(text);
        if !missing.is_empty() {
            let missing: String = missing.into_iter().collect();
            warn!(text, %missing, "Font has no glyphs for some characters; pass a font that covers them");
        }
        self.checked.insert(text.to_owned());
    }

    fn finish_page(&mut self) {
        if let Some(page) = self.current.take() {
            self.pages.push(PdfPage::new(page.width, page.height, page.ops));
        }
    }
}

fn black() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        icc_profile: None,
    })
}

fn corner(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: PdfPoint { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

impl DocumentSink for PdfSink {
    type Font = PdfFont;
    type Image = PdfImage;

    #[instrument(skip_all, fields(font_len = font.bytes().len()))]
    fn embed_font(&mut self, font: &LabelFont) -> Result<PdfFont> {
        ttf_parser::Face::parse(font.bytes(), 0).map_err(|err| {
            LabelSheetError::DocumentGeneration(format!("font is unreadable: {err}"))
        })?;
        let mut warnings = Vec::new();
        let parsed = ParsedFont::from_bytes(font.bytes(), 0, &mut warnings).ok_or_else(|| {
            LabelSheetError::DocumentGeneration("font could not be embedded".into())
        })?;
        let id = self.doc.add_font(&parsed);
        info!("Font embedded");
        Ok(PdfFont {
            id,
            font: font.clone(),
        })
    }

    #[instrument(skip_all, fields(png_len = png.len()))]
    fn embed_image(&mut self, png: &[u8]) -> Result<PdfImage> {
        // Decode the image to get its dimensions and pixel data.
        let dynamic_image = ::image::load_from_memory(png).map_err(|err| {
            LabelSheetError::DocumentGeneration(format!("failed to decode barcode image: {err}"))
        })?;
        let (width, height) = (dynamic_image.width(), dynamic_image.height());

        // Convert to RGB8 for printpdf.
        let raw = RawImage {
            pixels: RawImageData::U8(dynamic_image.to_rgb8().into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let id = self.doc.add_image(&raw);
        debug!(width, height, "Image embedded");
        Ok(PdfImage { id, width, height })
    }

    fn new_page(&mut self, width_mm: f32, height_mm: f32) {
        self.finish_page();
        self.current = Some(OpenPage {
            width: Mm(width_mm),
            height: Mm(height_mm),
            ops: Vec::new(),
        });
    }

    fn draw_rect(&mut self, frame: Frame, stroke_width: f32) -> Result<()> {
        let outline = Line {
            points: vec![
                corner(frame.x, frame.y),
                corner(frame.right(), frame.y),
                corner(frame.right(), frame.top()),
                corner(frame.x, frame.top()),
            ],
            is_closed: true,
        };
        self.ops()?.extend([
            Op::SaveGraphicsState,
            Op::SetOutlineColor { col: black() },
            Op::SetOutlineThickness {
                pt: Pt(stroke_width),
            },
            Op::DrawLine { line: outline },
            Op::RestoreGraphicsState,
        ]);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, font: &PdfFont, size: f32) -> Result<()> {
        let cursor = Op::SetTextCursor {
            pos: PdfPoint {
                x: Pt(at.x),
                y: Pt(at.y),
            },
        };
        self.check_coverage(text, font);
        let set_font = Op::SetFontSize {
            size: Pt(size),
            font: font.id.clone(),
        };
        let write = Op::WriteText {
            items: vec![TextItem::Text(text.to_owned())],
            font: font.id.clone(),
        };
        self.ops()?.extend([
            Op::StartTextSection,
            cursor,
            set_font,
            write,
            Op::EndTextSection,
        ]);
        Ok(())
    }

    fn draw_image(&mut self, image: &PdfImage, frame: Frame) -> Result<()> {
        // At 72 dpi one pixel is one point, so the scale maps pixels to the frame.
        let op = Op::UseXobject {
            id: image.id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Pt(frame.x)),
                translate_y: Some(Pt(frame.y)),
                scale_x: Some(frame.width / image.width as f32),
                scale_y: Some(frame.height / image.height as f32),
                dpi: Some(72.0),
                rotate: None,
            },
        };
        self.ops()?.push(op);
        Ok(())
    }

    fn measure_text(&self, text: &str, font: &PdfFont, size: f32) -> Result<f32> {
        let face = ttf_parser::Face::parse(font.font.bytes(), 0).map_err(|err| {
            LabelSheetError::DocumentGeneration(format!("font is unreadable: {err}"))
        })?;
        let units: u32 = text
            .chars()
            .map(|ch| {
                let glyph = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
                u32::from(face.glyph_hor_advance(glyph).unwrap_or(0))
            })
            .sum();
        Ok(units as f32 * size / f32::from(face.units_per_em()))
    }

    #[instrument(skip_all)]
    fn serialize(mut self) -> Result<Vec<u8>> {
        self.finish_page();
        if self.pages.is_empty() {
            return Err(LabelSheetError::DocumentGeneration(
                "document has no pages".into(),
            ));
        }
        let page_count = self.pages.len();
        self.doc.with_pages(self.pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = self.doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(pages = page_count, bytes = output.len(), warnings = warnings.len(), "PDF serialized");
        Ok(output)
    }
}
