// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// labelsheet — spreadsheet in, 44-up barcode label PDF out.
//
// Entry point. Initialises logging, parses arguments, and runs the pipeline:
// read workbook → extract label rows → preview or compose the PDF.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use labelsheet_core::config::{OUTPUT_FILENAME, OUTPUT_MIME_TYPE};
use labelsheet_core::error::Result;
use labelsheet_core::human_errors::humanize_error;
use labelsheet_core::{ExtractionResult, IdentifierPolicy, LabelSheetConfig};
use labelsheet_document::{
    BarcodeRenderer, LabelFont, RasterBackend, RowExtractor, generate_pdf, read_workbook,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "labelsheet", version)]
#[command(about = "Print a 44-label A4 sheet per spreadsheet row, with an EAN-13 barcode on every label", long_about = None)]
struct Cli {
    /// Spreadsheet with one product per row (.xlsx, .xls, .ods)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, value_name = "FILE", default_value = OUTPUT_FILENAME)]
    output: PathBuf,

    /// Draw a border around every label
    #[arg(long)]
    border: bool,

    /// TrueType/OpenType font for label text and barcode digits
    /// (default: bundled Noto Sans; use e.g. Noto Sans JP for Japanese text)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// JSON configuration overriding the built-in layout
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Identifier cells hold 12 digits; compute the check digit
    #[arg(long)]
    compute_check_digit: bool,

    /// Print the extracted rows instead of writing a PDF
    #[arg(long)]
    preview: bool,

    /// With --preview, print the rows as JSON
    #[arg(long, requires = "preview")]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

/// Build the configuration from the optional file and command-line switches.
fn load_config(cli: &Cli) -> Result<LabelSheetConfig> {
    let mut config = match &cli.config {
        Some(path) => LabelSheetConfig::from_json_file(path)?,
        None => LabelSheetConfig::default(),
    };
    if cli.compute_check_digit {
        config.policy = IdentifierPolicy::ComputeCheckDigit;
    }
    config.validate()?;
    Ok(config)
}

fn load_font(path: Option<&Path>) -> Result<LabelFont> {
    match path {
        Some(path) => Ok(LabelFont::from_bytes(std::fs::read(path)?)),
        None => Ok(LabelFont::bundled()),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let font = load_font(cli.font.as_deref())?;

    let backend = RasterBackend::new().with_caption_font(font.clone());
    let renderer = BarcodeRenderer::with_backend(backend, &config);

    let workbook = std::fs::read(&cli.input)?;
    let rows = read_workbook(&workbook)?;
    let result = RowExtractor::new(&config, &renderer).extract(&rows)?;

    if !result.has_valid_data() {
        warn!(input = %cli.input.display(), "No rows with a valid JAN code; nothing to print");
        eprintln!("No rows with a valid JAN code were found in {}.", cli.input.display());
        return Ok(());
    }

    if cli.preview {
        print_preview(&config, &result, cli.json)?;
        return Ok(());
    }

    let pdf = generate_pdf(&config, &font, &result, cli.border)?;
    std::fs::write(&cli.output, &pdf)?;
    info!(
        output = %cli.output.display(),
        mime = OUTPUT_MIME_TYPE,
        pages = result.len(),
        "Label sheet written"
    );
    Ok(())
}

/// Show the rows that will be printed, one line per page.
fn print_preview(config: &LabelSheetConfig, result: &ExtractionResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result.rows())?);
        return Ok(());
    }
    for row in result.rows() {
        let cells: Vec<String> = (0..config.columns.min_columns).map(|i| row.text(i)).collect();
        println!("{}", cells.join(" | "));
    }
    Ok(())
}
