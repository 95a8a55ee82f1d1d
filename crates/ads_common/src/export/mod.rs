//! Report exports: CSV rows and a snapshot PDF, written with fixed filenames.

pub mod csv;
pub mod pdf;

use crate::render::format_text;
use crate::report::Report;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PDF_FILENAME: &str = "meta-ads-expert-report.pdf";
pub const CSV_FILENAME: &str = "meta-ads-expert-report.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode PDF: {0}")]
    Encode(std::io::Error),
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Write { .. } => "export_write",
            ExportError::Encode(_) => "export_encode",
        }
    }
}

fn write_file(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let path = dir.join(filename);
    fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, bytes))
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(path)
}

/// Write `meta-ads-expert-report.csv` into `dir`
pub fn write_csv(report: &Report, dir: &Path) -> Result<PathBuf, ExportError> {
    write_file(dir, CSV_FILENAME, csv::build_csv(report).as_bytes())
}

/// Snapshot the text view into `meta-ads-expert-report.pdf` inside `dir`
pub fn write_pdf(report: &Report, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = pdf::render_pdf(&format_text(report)).map_err(ExportError::Encode)?;
    write_file(dir, PDF_FILENAME, &bytes)
}
