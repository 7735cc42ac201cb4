//! Batch conversion: enumerate notes, parse, decode, and write each one in turn.

pub mod scan;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ConvertConfig;
use crate::decoder;
use crate::error::{Result, VntError};
use crate::export::text::{CollisionPolicy, TextWriter};
use crate::parser;

/// Options for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// File name suffix of candidate notes.
    pub extension: String,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Output name collision handling.
    pub on_collision: CollisionPolicy,
    /// Abort at the first failing file instead of collecting failures.
    pub fail_fast: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertConfig::default().into()
    }
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(cfg: ConvertConfig) -> Self {
        Self {
            extension: cfg.extension,
            recursive: cfg.recursive,
            on_collision: cfg.on_collision,
            fail_fast: cfg.fail_fast,
        }
    }
}

/// A single note that could not be converted.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Number of candidate files found.
    pub candidates: usize,
    /// `(input, output)` pairs of converted notes.
    pub converted: Vec<(PathBuf, PathBuf)>,
    /// Notes that failed, in processing order.
    pub failures: Vec<Failure>,
}

impl ConversionReport {
    /// True when every candidate was converted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Converts notes into one output directory.
pub struct Converter {
    writer: TextWriter,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter, creating `output_dir` (and parents) if needed.
    pub fn new(output_dir: &Path, options: ConvertOptions) -> Result<Self> {
        std::fs::create_dir_all(output_dir).map_err(|e| VntError::io(output_dir, e))?;
        Ok(Self {
            writer: TextWriter::new(output_dir, options.on_collision),
            options,
        })
    }

    /// Find the candidate notes under `input_dir`.
    pub fn find_notes(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        scan::find_notes(input_dir, &self.options.extension, self.options.recursive)
    }

    /// Convert one note file and return the path of the text file written.
    ///
    /// Nothing is written when parsing or decoding fails.
    pub fn convert_file(&mut self, path: &Path) -> Result<PathBuf> {
        let mut record = parser::parse_file(path)?;
        decoder::decode_record(&mut record)?;
        let text = record.text().unwrap_or_default();
        let output = self.writer.write(text, &record.modified)?;
        info!(
            input = %path.display(),
            output = %output.display(),
            "Converted note"
        );
        Ok(output)
    }

    /// Convert every path in order.
    ///
    /// With `fail_fast` the first error is returned; otherwise failures are
    /// logged, collected in the report, and the batch continues. The
    /// progress callback receives `(current, total)`.
    pub fn convert_all(
        &mut self,
        paths: &[PathBuf],
        progress: &dyn Fn(usize, usize),
    ) -> Result<ConversionReport> {
        let total = paths.len();
        let mut report = ConversionReport {
            candidates: total,
            ..Default::default()
        };

        for (i, path) in paths.iter().enumerate() {
            progress(i, total);
            match self.convert_file(path) {
                Ok(output) => report.converted.push((path.clone(), output)),
                Err(e) if self.options.fail_fast => return Err(e),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to convert note");
                    report.failures.push(Failure {
                        path: path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        progress(total, total);

        Ok(report)
    }

    /// Find and convert every note under `input_dir`.
    pub fn run(
        &mut self,
        input_dir: &Path,
        progress: &dyn Fn(usize, usize),
    ) -> Result<ConversionReport> {
        let paths = self.find_notes(input_dir)?;
        info!(
            input = %input_dir.display(),
            count = paths.len(),
            "Found notes"
        );
        self.convert_all(&paths, progress)
    }
}
