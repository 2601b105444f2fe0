// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode module — EAN-13 rasterization and the identifier-to-image renderer.

pub mod raster;
pub mod renderer;

pub use raster::{BarcodeBackend, RasterBackend, Symbology};
pub use renderer::BarcodeRenderer;
