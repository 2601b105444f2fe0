// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the labelsheet-document crate: barcode rendering
// and full label sheet composition.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use labelsheet_core::{ExtractionResult, LabelSheetConfig, TabularRow};
use labelsheet_document::{BarcodeRenderer, LabelFont, RowExtractor, generate_pdf};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Ten product rows with valid JAN codes.
fn sample_rows() -> Vec<TabularRow> {
    ["4901234567894", "5901234123457", "4006381333931", "0012345678905", "9780201379624"]
        .into_iter()
        .cycle()
        .take(10)
        .enumerate()
        .map(|(i, code)| {
            let product = format!("P-{i:03}");
            let name = format!("Product {i}");
            [product.as_str(), name.as_str(), code, &code[..12], "001"]
                .into_iter()
                .collect()
        })
        .collect()
}

fn sample_extraction(config: &LabelSheetConfig) -> ExtractionResult {
    let renderer = BarcodeRenderer::new(config);
    RowExtractor::new(config, &renderer)
        .extract(&sample_rows())
        .expect("sample rows extract")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Render a single EAN-13 barcode at the default resolution.
fn bench_render_barcode(c: &mut Criterion) {
    let config = LabelSheetConfig::default();
    let renderer = BarcodeRenderer::new(&config);

    c.bench_function("render_barcode (EAN-13)", |b| {
        b.iter(|| black_box(renderer.render(black_box("4901234567894"))));
    });
}

/// Compose ten pages of 44 labels each with borders.
fn bench_generate_pdf(c: &mut Criterion) {
    let config = LabelSheetConfig::default();
    let extraction = sample_extraction(&config);

    c.bench_function("generate_pdf (10 pages)", |b| {
        b.iter(|| {
            let bytes = generate_pdf(&config, &LabelFont::bundled(), black_box(&extraction), true);
            black_box(bytes)
        });
    });
}

criterion_group!(benches, bench_render_barcode, bench_generate_pdf);
criterion_main!(benches);
