//! Zip inspection, extraction into a staging directory, and flattening of
//! the single wrapping directory release archives conventionally carry.

use crate::error::{Result, SpecifyError};
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Result of [`flatten`]: the effective source root and whether a wrapping
/// directory was stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOutcome {
    pub root: PathBuf,
    pub applied: bool,
}

/// Count the archive's entries without extracting. Purely a diagnostic;
/// callers treat failure as non-fatal.
pub fn list_entries(archive_path: &Path) -> Result<usize> {
    let file =
        File::open(archive_path).map_err(|e| SpecifyError::ArchiveUnreadable(e.to_string()))?;
    let archive =
        ZipArchive::new(file).map_err(|e| SpecifyError::ArchiveUnreadable(e.to_string()))?;
    Ok(archive.len())
}

/// Fully unpack the archive into `staging`, creating it fresh.
pub fn extract(archive_path: &Path, staging: &Path) -> Result<()> {
    std::fs::create_dir_all(staging).map_err(|e| SpecifyError::ExtractionFailed(e.to_string()))?;
    let file =
        File::open(archive_path).map_err(|e| SpecifyError::ExtractionFailed(e.to_string()))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| SpecifyError::ExtractionFailed(e.to_string()))?;
    archive
        .extract(staging)
        .map_err(|e| SpecifyError::ExtractionFailed(e.to_string()))?;
    Ok(())
}

/// Number of entries directly under `dir`.
pub fn top_level_count(dir: &Path) -> Result<usize> {
    Ok(std::fs::read_dir(dir)?.count())
}

/// Strip a redundant single wrapping directory.
///
/// If `staging` contains exactly one entry and that entry is a directory,
/// the directory becomes the effective source root. Anything else leaves
/// `staging` unchanged, which also makes a second flatten a no-op.
pub fn flatten(staging: &Path) -> Result<FlattenOutcome> {
    let entries: Vec<PathBuf> = std::fs::read_dir(staging)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();

    if entries.len() == 1 && entries[0].is_dir() {
        return Ok(FlattenOutcome {
            root: entries[0].clone(),
            applied: true,
        });
    }
    Ok(FlattenOutcome {
        root: staging.to_path_buf(),
        applied: false,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
