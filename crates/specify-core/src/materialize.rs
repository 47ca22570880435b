//! Copy the staged template tree into its final destination.

use crate::error::{Result, SpecifyError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationMode {
    /// The path must not exist before the pipeline starts.
    NewDirectory,
    /// Merge into an existing (possibly non-empty) directory.
    InPlaceMerge,
}

/// Where the project lands. The mode is fixed before the run and only
/// affects the precheck; the copy itself always merge-overwrites.
#[derive(Debug, Clone)]
pub struct Destination {
    pub path: PathBuf,
    pub mode: DestinationMode,
}

impl Destination {
    pub fn new_directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: DestinationMode::NewDirectory,
        }
    }

    pub fn in_place(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: DestinationMode::InPlaceMerge,
        }
    }
}

/// Recursively copy everything under `source_root` into the destination,
/// creating intermediate directories and overwriting conflicting files.
/// Partial copies are left in place on failure; there is no rollback.
pub fn materialize(source_root: &Path, destination: &Destination) -> Result<()> {
    copy_tree(source_root, &destination.path)
        .map_err(|e| SpecifyError::MaterializationFailed(e.to_string()))
}

fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
