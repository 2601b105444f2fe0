// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label sheet composer — one A4 page per extracted row, the row's label
// repeated in all 44 grid containers.

use labelsheet_core::config::{DOCUMENT_TITLE, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use labelsheet_core::error::{LabelSheetError, Result};
use labelsheet_core::{ExtractionResult, LabelSheetConfig, TabularRow};
use tracing::{debug, info, instrument};

use super::sink::DocumentSink;
use super::writer::PdfSink;
use crate::font::LabelFont;
use crate::layout::LabelLayout;

/// Text of one label, with centred-line widths measured once per row.
struct LabelText {
    centered: Vec<(String, f32)>,
    code: String,
}

/// Drives the layout engine over a document sink.
#[derive(Debug, Clone, Copy)]
pub struct LabelSheetComposer<'a> {
    config: &'a LabelSheetConfig,
}

impl<'a> LabelSheetComposer<'a> {
    pub fn new(config: &'a LabelSheetConfig) -> Self {
        Self { config }
    }

    /// Compose every row onto its own page and serialize the document.
    ///
    /// The font and every barcode are embedded once, before the first page.
    ///
    /// # Errors
    ///
    /// `DocumentGeneration` when there is nothing to print or when any
    /// embedding, drawing or serialization step fails. Nothing partial is
    /// returned.
    #[instrument(skip_all, fields(rows = result.len(), show_border = show_border))]
    pub fn compose<S: DocumentSink>(
        &self,
        sink: S,
        font: &LabelFont,
        result: &ExtractionResult,
        show_border: bool,
    ) -> Result<Vec<u8>> {
        self.compose_into(sink, font, result, show_border)
            .map_err(into_document_error)
    }

    fn compose_into<S: DocumentSink>(
        &self,
        mut sink: S,
        font: &LabelFont,
        result: &ExtractionResult,
        show_border: bool,
    ) -> Result<Vec<u8>> {
        if !result.has_valid_data() {
            return Err(LabelSheetError::DocumentGeneration(
                "no valid rows to print".into(),
            ));
        }

        let layout = LabelLayout::new(&self.config.layout);
        let constants = layout.constants();
        let (_, page_height) = layout.page_size();

        let font = sink.embed_font(font)?;
        let images = result
            .barcodes()
            .iter()
            .map(|barcode| sink.embed_image(&barcode.png))
            .collect::<Result<Vec<_>>>()?;
        debug!(images = images.len(), "Resources embedded");

        for ((row, barcode), image) in result.labels().zip(&images) {
            let text = self.label_text(&sink, row, &font)?;
            sink.new_page(PAGE_WIDTH_MM, PAGE_HEIGHT_MM);

            for container in layout.containers(page_height) {
                if show_border {
                    sink.draw_rect(container, constants.border_width)?;
                }

                for (index, (line, width)) in text.centered.iter().enumerate() {
                    let at = layout.centered_line(&container, index, *width);
                    sink.draw_text(line, at, &font, constants.font_size)?;
                }

                let frame = layout.barcode_frame(&container, barcode.width, barcode.height);
                sink.draw_image(image, frame)?;

                let at = layout.code_line(&container);
                sink.draw_text(&text.code, at, &font, constants.font_size)?;
            }
        }

        let bytes = sink.serialize()?;
        info!(pages = result.len(), bytes = bytes.len(), "Label sheet composed");
        Ok(bytes)
    }

    fn label_text<S: DocumentSink>(
        &self,
        sink: &S,
        row: &TabularRow,
        font: &S::Font,
    ) -> Result<LabelText> {
        let size = self.config.layout.font_size;
        let centered = self
            .config
            .columns
            .centered
            .iter()
            .map(|&column| {
                let line = row.label_text(column);
                let width = sink.measure_text(&line, font, size)?;
                Ok((line, width))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LabelText {
            centered,
            code: row.label_text(self.config.columns.leading_code),
        })
    }
}

/// Every failure while composing surfaces as a document error.
fn into_document_error(err: LabelSheetError) -> LabelSheetError {
    match err {
        LabelSheetError::DocumentGeneration(_) => err,
        other => LabelSheetError::DocumentGeneration(other.to_string()),
    }
}

/// Compose `result` into PDF bytes with the default `printpdf` sink.
pub fn generate_pdf(
    config: &LabelSheetConfig,
    font: &LabelFont,
    result: &ExtractionResult,
    show_border: bool,
) -> Result<Vec<u8>> {
    LabelSheetComposer::new(config).compose(PdfSink::new(DOCUMENT_TITLE), font, result, show_border)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use labelsheet_core::{BarcodeImage, Cell};

    use super::*;
    use crate::layout::{Frame, Point};

    #[derive(Debug, Clone, PartialEq)]
    enum Recorded {
        Page,
        Rect(Frame),
        Text { text: String, at: Point, font: usize },
        Image { image: usize, frame: Frame },
    }

    #[derive(Debug, Default)]
    struct Log {
        fonts: usize,
        images: usize,
        ops: Vec<Recorded>,
    }

    impl Log {
        fn count(&self, pred: impl Fn(&Recorded) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }

        fn pages(&self) -> Vec<&[Recorded]> {
            self.ops
                .split(|op| *op == Recorded::Page)
                .skip(1)
                .collect()
        }
    }

    /// Sink that records every call into a shared log instead of a file.
    #[derive(Default)]
    struct RecordingSink {
        log: Rc<RefCell<Log>>,
        fail_images: bool,
    }

    impl DocumentSink for RecordingSink {
        type Font = usize;
        type Image = usize;

        fn embed_font(&mut self, _: &LabelFont) -> Result<usize> {
            let mut log = self.log.borrow_mut();
            log.fonts += 1;
            Ok(log.fonts - 1)
        }

        fn embed_image(&mut self, _: &[u8]) -> Result<usize> {
            if self.fail_images {
                return Err(LabelSheetError::BarcodeGeneration("corrupt image buffer".into()));
            }
            let mut log = self.log.borrow_mut();
            log.images += 1;
            Ok(log.images - 1)
        }

        fn new_page(&mut self, _: f32, _: f32) {
            self.log.borrow_mut().ops.push(Recorded::Page);
        }

        fn draw_rect(&mut self, frame: Frame, _: f32) -> Result<()> {
            self.log.borrow_mut().ops.push(Recorded::Rect(frame));
            Ok(())
        }

        fn draw_text(&mut self, text: &str, at: Point, font: &usize, _: f32) -> Result<()> {
            self.log.borrow_mut().ops.push(Recorded::Text {
                text: text.to_owned(),
                at,
                font: *font,
            });
            Ok(())
        }

        fn draw_image(&mut self, image: &usize, frame: Frame) -> Result<()> {
            self.log.borrow_mut().ops.push(Recorded::Image {
                image: *image,
                frame,
            });
            Ok(())
        }

        fn measure_text(&self, text: &str, _: &usize, size: f32) -> Result<f32> {
            Ok(text.len() as f32 * size * 0.5)
        }

        fn serialize(self) -> Result<Vec<u8>> {
            Ok(b"%PDF-recorded".to_vec())
        }
    }

    fn label(code: &str, name: &str) -> (TabularRow, BarcodeImage) {
        let row = [code, name, "4901234567894", "490123456789", "001"]
            .into_iter()
            .collect();
        let image = BarcodeImage {
            png: Vec::new(),
            width: 1160,
            height: 520,
        };
        (row, image)
    }

    fn extraction(labels: Vec<(TabularRow, BarcodeImage)>) -> ExtractionResult {
        let (rows, images) = labels.into_iter().unzip();
        ExtractionResult::new(rows, images).unwrap()
    }

    /// Compose into a recording sink and hand back its log.
    fn record(result: &ExtractionResult, show_border: bool) -> Rc<RefCell<Log>> {
        let config = LabelSheetConfig::default();
        let sink = RecordingSink::default();
        let log = Rc::clone(&sink.log);
        let bytes = LabelSheetComposer::new(&config)
            .compose(sink, &LabelFont::bundled(), result, show_border)
            .unwrap();
        assert_eq!(bytes, b"%PDF-recorded");
        log
    }

    #[test]
    fn single_row_with_border_draws_44_labels() {
        let log = record(&extraction(vec![label("ABC-001", "Widget")]), true);
        let log = log.borrow();

        assert_eq!(log.fonts, 1);
        assert_eq!(log.images, 1);
        assert_eq!(log.pages().len(), 1);
        assert_eq!(log.count(|op| matches!(op, Recorded::Rect(_))), 44);
        assert_eq!(log.count(|op| matches!(op, Recorded::Text { .. })), 44 * 5);
        assert_eq!(log.count(|op| matches!(op, Recorded::Image { .. })), 44);
        assert!(log.ops.iter().all(|op| match op {
            Recorded::Image { image, .. } => *image == 0,
            Recorded::Text { font, .. } => *font == 0,
            _ => true,
        }));
    }

    #[test]
    fn border_is_optional() {
        let log = record(&extraction(vec![label("ABC-001", "Widget")]), false);
        let log = log.borrow();
        assert_eq!(log.count(|op| matches!(op, Recorded::Rect(_))), 0);
        assert_eq!(log.count(|op| matches!(op, Recorded::Text { .. })), 220);
    }

    #[test]
    fn one_page_per_row_repeating_that_row() {
        let result = extraction(vec![label("ABC-001", "Widget"), label("XYZ-9", "Gadget")]);
        let log = record(&result, true);
        let log = log.borrow();

        assert_eq!(log.fonts, 1);
        assert_eq!(log.images, 2);
        let pages = log.pages();
        assert_eq!(pages.len(), 2);

        for (page, (code, image_index)) in pages.iter().zip([("ABC-001", 0), ("XYZ-9", 1)]) {
            let codes = page
                .iter()
                .filter(|op| matches!(op, Recorded::Text { text, .. } if text == code))
                .count();
            assert_eq!(codes, 44);
            assert!(page.iter().all(|op| match op {
                Recorded::Image { image, .. } => *image == image_index,
                _ => true,
            }));
        }
    }

    #[test]
    fn code_line_is_left_aligned_inside_its_container() {
        let log = record(&extraction(vec![label("ABC-001", "Widget")]), true);
        let log = log.borrow();
        let Recorded::Rect(first) = log.ops[1].clone() else {
            panic!("expected the first container border, got {:?}", log.ops[1]);
        };
        let code_at = log
            .ops
            .iter()
            .find_map(|op| match op {
                Recorded::Text { text, at, .. } if text == "ABC-001" => Some(*at),
                _ => None,
            })
            .unwrap();
        let constants = LabelSheetConfig::default().layout;
        let layout = LabelLayout::new(&constants);
        assert!((code_at.x - (first.x + layout.text_margin())).abs() < 1e-3);
        assert!(code_at.y > first.y && code_at.y < first.top());
    }

    #[test]
    fn zero_cells_print_nothing() {
        let row = TabularRow::new(vec![
            Cell::from("ABC-001"),
            Cell::from("Widget"),
            Cell::from("4901234567894"),
            Cell::from("490123456789"),
            Cell::Number(0.0),
        ]);
        let (_, image) = label("ABC-001", "Widget");
        let log = record(&extraction(vec![(row, image)]), false);
        let log = log.borrow();
        let blank = log.count(|op| matches!(op, Recorded::Text { text, .. } if text.is_empty()));
        assert_eq!(blank, 44);
        assert_eq!(log.count(|op| matches!(op, Recorded::Text { text, .. } if text == "0")), 0);
    }

    #[test]
    fn empty_extraction_is_refused() {
        let config = LabelSheetConfig::default();
        let err = LabelSheetComposer::new(&config)
            .compose(RecordingSink::default(), &LabelFont::bundled(), &ExtractionResult::default(), true)
            .unwrap_err();
        assert!(matches!(err, LabelSheetError::DocumentGeneration(_)));
    }

    #[test]
    fn embedding_failures_become_document_errors() {
        let config = LabelSheetConfig::default();
        let sink = RecordingSink {
            fail_images: true,
            ..RecordingSink::default()
        };
        let err = LabelSheetComposer::new(&config)
            .compose(sink, &LabelFont::bundled(), &extraction(vec![label("A", "B")]), true)
            .unwrap_err();
        match err {
            LabelSheetError::DocumentGeneration(msg) => assert!(msg.contains("corrupt image buffer")),
            other => panic!("expected document error, got {other:?}"),
        }
    }

    #[test]
    fn generates_a_real_pdf() {
        let config = LabelSheetConfig::default();
        let renderer = crate::barcode::BarcodeRenderer::new(&config);
        let barcode = renderer.render("4901234567894").unwrap();
        let row: TabularRow = ["ABC-001", "Widget", "4901234567894", "490123456789", "001"]
            .into_iter()
            .collect();
        let result =
            ExtractionResult::new(vec![row.clone(), row], vec![barcode.clone(), barcode]).unwrap();

        let bytes = generate_pdf(&config, &LabelFont::bundled(), &result, true).unwrap();
        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 2);
    }
}
