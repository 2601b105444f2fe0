// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — the document sink abstraction, its printpdf implementation and
// the label sheet composer.

pub mod composer;
pub mod sink;
pub mod writer;

pub use composer::{LabelSheetComposer, generate_pdf};
pub use sink::DocumentSink;
pub use writer::PdfSink;
