//! Stage sequencing, per-stage failure policy, and temp-resource cleanup
//! for the init pipeline.

use crate::archive;
use crate::assistant::Assistant;
use crate::error::{Result, SpecifyError};
use crate::git::VersionControl;
use crate::materialize::{self, Destination, DestinationMode};
use crate::release::ReleaseSource;
use crate::tools;
use crate::tracker::{StepStatus, StepTracker};

// ---------------------------------------------------------------------------
// Stage table
// ---------------------------------------------------------------------------

/// What a stage failure does to the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the remaining stages; the run fails.
    Fatal,
    /// Record the error on the stage and keep going.
    Continue,
    /// Ignore the failure entirely; the stage still completes.
    Swallow,
}

/// The fixed stage sequence: (key, label, failure policy).
pub const STAGES: &[(&str, &str, FailurePolicy)] = &[
    ("precheck", "Check required tools", FailurePolicy::Fatal),
    ("ai-select", "Select AI assistant", FailurePolicy::Fatal),
    ("fetch", "Fetch latest release", FailurePolicy::Fatal),
    ("download", "Download template", FailurePolicy::Fatal),
    ("zip-list", "Archive contents", FailurePolicy::Continue),
    ("extract", "Extract template", FailurePolicy::Fatal),
    ("extracted-summary", "Extraction summary", FailurePolicy::Continue),
    ("flatten", "Flatten nested directory", FailurePolicy::Continue),
    ("cleanup", "Cleanup", FailurePolicy::Swallow),
    ("git", "Initialize git repository", FailurePolicy::Continue),
    ("final", "Finalize", FailurePolicy::Fatal),
];

pub fn policy(key: &str) -> Option<FailurePolicy> {
    STAGES
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, _, p)| *p)
}

// ---------------------------------------------------------------------------
// Options / result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub assistant: Assistant,
    pub destination: Destination,
    pub no_git: bool,
    pub ignore_agent_tools: bool,
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub success: bool,
    pub failure_detail: Option<String>,
}

// ---------------------------------------------------------------------------
// Precheck
// ---------------------------------------------------------------------------

/// Preconditions evaluated before the pipeline starts. If this fails the
/// pipeline is never run and the tracker never created.
pub fn precheck(options: &PipelineOptions) -> Result<()> {
    if options.destination.mode == DestinationMode::NewDirectory
        && options.destination.path.exists()
    {
        return Err(SpecifyError::DestinationExists(
            options.destination.path.display().to_string(),
        ));
    }
    if !options.ignore_agent_tools {
        if let Some((tool, hint)) = options.assistant.required_tool() {
            if !tools::exists(tool) {
                return Err(SpecifyError::AgentToolMissing {
                    tool: tool.to_string(),
                    assistant: options.assistant.display_name().to_string(),
                    hint: hint.to_string(),
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Tracker mutations funnel through this so the display is refreshed after
/// every single transition.
struct Progress<'a, F: FnMut(&StepTracker)> {
    tracker: &'a mut StepTracker,
    render: F,
}

impl<'a, F: FnMut(&StepTracker)> Progress<'a, F> {
    fn start(&mut self, key: &str) {
        self.tracker.start(key);
        (self.render)(&*self.tracker);
    }

    fn complete(&mut self, key: &str, detail: Option<&str>) {
        self.tracker.complete(key, detail);
        (self.render)(&*self.tracker);
    }

    fn error(&mut self, key: &str, detail: Option<&str>) {
        self.tracker.error(key, detail);
        (self.render)(&*self.tracker);
    }

    fn skip(&mut self, key: &str, detail: Option<&str>) {
        self.tracker.skip(key, detail);
        (self.render)(&*self.tracker);
    }

    /// The stage currently in flight, if any. At most one stage runs at a
    /// time, so this is the stage a fatal error came from.
    fn running_stage(&self) -> Option<String> {
        self.tracker
            .snapshot()
            .iter()
            .find(|s| s.status == StepStatus::Running)
            .map(|s| s.key.clone())
    }
}

/// Run the full init pipeline against `tracker`, invoking `render` after
/// every tracker mutation.
///
/// Assumes [`precheck`] already passed. Exactly one terminal outcome:
/// `final` = Done ("project ready") or `final` = Error with the failure
/// message as detail. Temporary files live in a scratch directory that is
/// removed on every exit path, aborts included.
pub fn run_init_pipeline<R, V, F>(
    source: &R,
    vcs: &V,
    options: &PipelineOptions,
    tracker: &mut StepTracker,
    render: F,
) -> PipelineResult
where
    R: ReleaseSource,
    V: VersionControl,
    F: FnMut(&StepTracker),
{
    let mut progress = Progress { tracker, render };
    for (key, label, _) in STAGES {
        progress.tracker.register(key, label);
    }
    (progress.render)(&*progress.tracker);

    let outcome = run_stages(source, vcs, options, &mut progress);

    match outcome {
        Ok(()) => {
            progress.complete("final", Some("project ready"));
            PipelineResult {
                success: true,
                failure_detail: None,
            }
        }
        Err(e) => {
            let detail = e.to_string();
            if let Some(key) = progress.running_stage() {
                progress.error(&key, Some(&detail));
            }
            progress.error("final", Some(&detail));
            PipelineResult {
                success: false,
                failure_detail: Some(detail),
            }
        }
    }
}

fn run_stages<R, V, F>(
    source: &R,
    vcs: &V,
    options: &PipelineOptions,
    p: &mut Progress<'_, F>,
) -> Result<()>
where
    R: ReleaseSource,
    V: VersionControl,
    F: FnMut(&StepTracker),
{
    p.complete("precheck", Some("ok"));
    p.complete("ai-select", Some(options.assistant.id()));

    // Downloaded archive and staging directory both live here; dropping the
    // TempDir removes whatever is left, on success and on abort alike.
    let scratch = tempfile::Builder::new().prefix("specify-").tempdir()?;

    p.start("fetch");
    let release = source.resolve_latest(options.assistant.id())?;
    p.complete("fetch", Some(&release.tag));

    p.start("download");
    let archive_path = scratch.path().join(&release.asset_name);
    source.download(&release, &archive_path)?;
    p.complete("download", Some(&release.asset_name));

    p.start("zip-list");
    match archive::list_entries(&archive_path) {
        Ok(n) => p.complete("zip-list", Some(&format!("{n} entries"))),
        Err(e) => p.error("zip-list", Some(&e.to_string())),
    }

    p.start("extract");
    let staging = scratch.path().join("staging");
    archive::extract(&archive_path, &staging)?;
    p.complete("extract", None);

    p.start("extracted-summary");
    match archive::top_level_count(&staging) {
        Ok(n) => p.complete("extracted-summary", Some(&format!("{n} top-level items"))),
        Err(e) => p.error("extracted-summary", Some(&e.to_string())),
    }

    let flattened = archive::flatten(&staging)?;
    if flattened.applied {
        p.complete("flatten", Some("applied"));
    } else {
        p.skip("flatten", Some("not needed"));
    }

    materialize::materialize(&flattened.root, &options.destination)?;

    p.start("cleanup");
    if let Err(e) = std::fs::remove_file(&archive_path) {
        // Leaked temp file is never worth failing the run over.
        tracing::warn!(error = %e, path = %archive_path.display(), "failed to remove downloaded archive");
    }
    p.complete("cleanup", None);

    if options.no_git {
        p.skip("git", Some("--no-git"));
    } else {
        p.start("git");
        if vcs.is_repo(&options.destination.path) {
            p.complete("git", Some("existing repo"));
        } else if vcs.available() {
            match vcs.init_and_commit(&options.destination.path) {
                Ok(()) => p.complete("git", Some("initialized")),
                Err(e) => p.error("git", Some(&e.to_string())),
            }
        } else {
            p.skip("git", Some("git not found"));
        }
    }

    if let Err(e) = scratch.close() {
        tracing::warn!(error = %e, "failed to remove scratch directory");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
