//! Write decoded notes as UTF-8 text files named after their modification time.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, VntError};

/// Extension of every output file.
pub const TEXT_EXTENSION: &str = ".txt";

/// How to handle two notes in one run that map to the same file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append `-1`, `-2`, ... to the later file names.
    #[default]
    Suffix,
    /// Let the later note replace the earlier one.
    Overwrite,
    /// Refuse to write the later note.
    Error,
}

/// Output file name for a note: ISO 8601 modification time plus `.txt`.
///
/// `2023-01-02 10:00:00` → `2023-01-02T10:00:00.txt`
pub fn text_filename(modified: &NaiveDateTime) -> String {
    format!("{}{TEXT_EXTENSION}", modified.format("%Y-%m-%dT%H:%M:%S"))
}

/// Writes note text into one output directory, tracking names used in this run.
///
/// Files that already existed before the run are overwritten so that
/// re-running a conversion is idempotent.
pub struct TextWriter {
    output_dir: PathBuf,
    policy: CollisionPolicy,
    written: HashSet<PathBuf>,
}

impl TextWriter {
    /// Create a writer for an existing output directory.
    pub fn new(output_dir: impl Into<PathBuf>, policy: CollisionPolicy) -> Self {
        Self {
            output_dir: output_dir.into(),
            policy,
            written: HashSet::new(),
        }
    }

    /// Write `text` as UTF-8 under the name derived from `modified`.
    ///
    /// Returns the path of the created file.
    pub fn write(&mut self, text: &str, modified: &NaiveDateTime) -> Result<PathBuf> {
        let path = self.resolve_path(modified)?;
        std::fs::write(&path, text).map_err(|e| VntError::io(&path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "Wrote note text");
        self.written.insert(path.clone());
        Ok(path)
    }

    /// Pick the output path for `modified`, applying the collision policy.
    fn resolve_path(&self, modified: &NaiveDateTime) -> Result<PathBuf> {
        let path = self.output_dir.join(text_filename(modified));
        if !self.written.contains(&path) {
            return Ok(path);
        }

        match self.policy {
            CollisionPolicy::Overwrite => {
                warn!(path = %path.display(), "Overwriting note written earlier in this run");
                Ok(path)
            }
            CollisionPolicy::Error => Err(VntError::OutputCollision(path)),
            CollisionPolicy::Suffix => {
                let stem = modified.format("%Y-%m-%dT%H:%M:%S").to_string();
                let candidate = (1..)
                    .map(|n| self.output_dir.join(format!("{stem}-{n}{TEXT_EXTENSION}")))
                    .find(|p| !self.written.contains(p))
                    .unwrap_or(path);
                debug!(path = %candidate.display(), "Output name taken, using suffix");
                Ok(candidate)
            }
        }
    }
}
