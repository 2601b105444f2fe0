// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout engine — millimetre geometry of the 4 × 11 label grid, in PDF points
// with the origin at the bottom-left of the page.
//
// Everything here is pure: no I/O, no state beyond the borrowed constants.

use labelsheet_core::LayoutConstants;
use labelsheet_core::config::{GRID_COLUMNS, GRID_ROWS, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

/// A position in document units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned box; `x`/`y` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True when the two frames share interior area.
    pub fn overlaps(&self, other: &Frame) -> bool {
        const EPS: f32 = 1e-3;
        self.x + EPS < other.right()
            && other.x + EPS < self.right()
            && self.y + EPS < other.top()
            && other.y + EPS < self.top()
    }
}

/// Grid geometry derived from [`LayoutConstants`].
#[derive(Debug, Clone, Copy)]
pub struct LabelLayout<'a> {
    constants: &'a LayoutConstants,
}

impl<'a> LabelLayout<'a> {
    pub fn new(constants: &'a LayoutConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &LayoutConstants {
        self.constants
    }

    /// Millimetres to document units.
    pub fn mm_to_units(&self, mm: f32) -> f32 {
        mm * self.constants.mm_to_units
    }

    /// Page size in document units.
    pub fn page_size(&self) -> (f32, f32) {
        (self.mm_to_units(PAGE_WIDTH_MM), self.mm_to_units(PAGE_HEIGHT_MM))
    }

    pub fn container_width(&self) -> f32 {
        self.mm_to_units(self.constants.container_width_mm)
    }

    pub fn container_height(&self) -> f32 {
        self.mm_to_units(self.constants.container_height_mm)
    }

    pub fn line_height(&self) -> f32 {
        self.mm_to_units(self.constants.line_height_mm)
    }

    pub fn text_margin(&self) -> f32 {
        self.mm_to_units(self.constants.text_margin_mm)
    }

    /// Bottom-left corner of the container at (`row`, `column`).
    ///
    /// Row 0 sits just under the top margin; column 0 just right of the left
    /// margin.
    pub fn container_origin(&self, page_height: f32, row: usize, column: usize) -> Point {
        let c = self.constants;
        Point {
            x: self.mm_to_units(c.margin_left_mm) + column as f32 * self.container_width(),
            y: page_height
                - self.mm_to_units(c.margin_top_mm)
                - (row + 1) as f32 * self.container_height(),
        }
    }

    /// The container at (`row`, `column`) as a frame.
    pub fn container(&self, page_height: f32, row: usize, column: usize) -> Frame {
        let origin = self.container_origin(page_height, row, column);
        Frame {
            x: origin.x,
            y: origin.y,
            width: self.container_width(),
            height: self.container_height(),
        }
    }

    /// All 44 containers of a page, row by row from the top.
    pub fn containers(&self, page_height: f32) -> impl Iterator<Item = Frame> + '_ {
        (0..GRID_ROWS).flat_map(move |row| {
            (0..GRID_COLUMNS).map(move |column| self.container(page_height, row, column))
        })
    }

    /// X that centres a run of `text_width` within the container.
    pub fn centered_x(&self, container: &Frame, text_width: f32) -> f32 {
        container.x + (container.width - text_width) / 2.0
    }

    /// Baseline of centred line `index` (0-based, top-down).
    pub fn centered_line(&self, container: &Frame, index: usize, text_width: f32) -> Point {
        Point {
            x: self.centered_x(container, text_width),
            y: container.top()
                - (index + 1) as f32 * self.line_height()
                - self.mm_to_units(self.constants.baseline_offset_mm),
        }
    }

    /// Baseline of the left-aligned code line next to the barcode.
    pub fn code_line(&self, container: &Frame) -> Point {
        Point {
            x: container.x + self.text_margin(),
            y: container.top() - self.constants.code_line_offset * self.line_height(),
        }
    }

    /// Where a barcode of `image_width` × `image_height` pixels goes.
    ///
    /// Uniformly scaled to a fixed share of the container height and anchored
    /// bottom-right, inset by the text margin on both sides.
    pub fn barcode_frame(&self, container: &Frame, image_width: u32, image_height: u32) -> Frame {
        let height = container.height * self.constants.barcode_height_scale;
        let width = image_width as f32 * (height / image_height.max(1) as f32);
        let margin = self.text_margin();
        Frame {
            x: container.right() - width - margin,
            y: container.y + margin,
            width,
            height,
        }
    }
}
