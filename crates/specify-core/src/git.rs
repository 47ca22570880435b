//! Version-control collaborator. The pipeline only sees pass/fail.

use crate::error::{Result, SpecifyError};
use std::path::Path;
use std::process::Command;

const COMMIT_MESSAGE: &str = "Initial commit from Specify template";

/// Capability seam for version control. The orchestrator never depends on
/// git internals, only on these three questions.
pub trait VersionControl {
    /// True if the git tool is installed at all.
    fn available(&self) -> bool;
    /// True if `path` is already inside a work tree. Never errors.
    fn is_repo(&self, path: &Path) -> bool;
    /// Create a repository at `path` and commit everything in it.
    fn init_and_commit(&self, path: &Path) -> Result<()>;
}

/// Production implementation shelling out to the `git` binary.
pub struct GitCli;

impl VersionControl for GitCli {
    fn available(&self) -> bool {
        crate::tools::exists("git")
    }

    fn is_repo(&self, path: &Path) -> bool {
        Command::new("git")
            .args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(path)
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    fn init_and_commit(&self, path: &Path) -> Result<()> {
        run_git(&["init"], path)?;
        run_git(&["add", "."], path)?;
        run_git(&["commit", "-m", COMMIT_MESSAGE], path)?;
        Ok(())
    }
}

fn run_git(args: &[&str], cwd: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| SpecifyError::VersionControlFailed(e.to_string()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SpecifyError::VersionControlFailed(
            stderr.trim().to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
