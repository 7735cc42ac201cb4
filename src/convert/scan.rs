//! Candidate discovery: find note files under the input directory.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, VntError};

/// List files under `input_dir` whose name ends with `extension`.
///
/// The suffix match is case-sensitive. Subdirectories are visited only when
/// `recursive` is set. Entries are visited in file name order so runs are reproducible.
pub fn find_notes(input_dir: &Path, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(VntError::InputDirectoryNotFound(input_dir.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut notes = Vec::new();

    for entry in WalkDir::new(input_dir).max_depth(max_depth).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(extension));
        if matches {
            notes.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "Skipping non-note file");
        }
    }

    Ok(notes)
}
