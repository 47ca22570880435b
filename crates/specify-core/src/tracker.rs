use serde::Serialize;

// ---------------------------------------------------------------------------
// Step / StepStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Error,
    Skipped,
}

impl StepStatus {
    /// Done, Error, and Skipped are terminal for a step within one run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Done | StepStatus::Error | StepStatus::Skipped)
    }
}

/// One named unit of pipeline progress.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub key: String,
    pub label: String,
    pub status: StepStatus,
    pub detail: Option<String>,
}

// ---------------------------------------------------------------------------
// StepTracker
// ---------------------------------------------------------------------------

/// Ordered registry of pipeline steps.
///
/// One tracker per pipeline invocation. The orchestrator is the only
/// mutator; rendering reads [`StepTracker::snapshot`] and never writes.
#[derive(Debug, Clone, Serialize)]
pub struct StepTracker {
    title: String,
    steps: Vec<Step>,
}

impl StepTracker {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Add a step with status Pending. Re-registering an existing key is a
    /// no-op; registration order is rendering order.
    pub fn register(&mut self, key: &str, label: &str) {
        if self.steps.iter().all(|s| s.key != key) {
            self.steps.push(Step {
                key: key.to_string(),
                label: label.to_string(),
                status: StepStatus::Pending,
                detail: None,
            });
        }
    }

    pub fn register_many(&mut self, steps: &[(&str, &str)]) {
        for (key, label) in steps {
            self.register(key, label);
        }
    }

    /// Set a step's status, registering the key on the fly (label = key) if
    /// it was never registered. A non-empty `detail` overwrites the previous
    /// one; an empty or absent detail leaves it untouched.
    pub fn transition(&mut self, key: &str, status: StepStatus, detail: Option<&str>) {
        let idx = match self.steps.iter().position(|s| s.key == key) {
            Some(i) => i,
            None => {
                self.steps.push(Step {
                    key: key.to_string(),
                    label: key.to_string(),
                    status: StepStatus::Pending,
                    detail: None,
                });
                self.steps.len() - 1
            }
        };
        let step = &mut self.steps[idx];
        step.status = status;
        if let Some(d) = detail {
            if !d.trim().is_empty() {
                step.detail = Some(d.to_string());
            }
        }
    }

    pub fn start(&mut self, key: &str) {
        self.transition(key, StepStatus::Running, None);
    }

    pub fn complete(&mut self, key: &str, detail: Option<&str>) {
        self.transition(key, StepStatus::Done, detail);
    }

    pub fn error(&mut self, key: &str, detail: Option<&str>) {
        self.transition(key, StepStatus::Error, detail);
    }

    pub fn skip(&mut self, key: &str, detail: Option<&str>) {
        self.transition(key, StepStatus::Skipped, detail);
    }

    /// Read-only view of all steps in registration order.
    pub fn snapshot(&self) -> &[Step] {
        &self.steps
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent_and_ordered() {
        let mut t = StepTracker::new("run");
        t.register("a", "First");
        t.register("b", "Second");
        t.register("a", "Renamed");

        let steps = t.snapshot();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].key, "a");
        assert_eq!(steps[0].label, "First");
        assert_eq!(steps[1].key, "b");
    }

    #[test]
    fn register_many_skips_duplicates() {
        let mut t = StepTracker::new("run");
        t.register_many(&[("a", "A"), ("b", "B"), ("a", "A again")]);
        assert_eq!(t.snapshot().len(), 2);
    }

    #[test]
    fn steps_start_pending() {
        let mut t = StepTracker::new("run");
        t.register("a", "A");
        assert_eq!(t.snapshot()[0].status, StepStatus::Pending);
        assert!(t.snapshot()[0].detail.is_none());
    }

    #[test]
    fn transition_on_unknown_key_auto_registers() {
        let mut t = StepTracker::new("run");
        t.complete("ghost", Some("done anyway"));

        let steps = t.snapshot();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].key, "ghost");
        assert_eq!(steps[0].label, "ghost");
        assert_eq!(steps[0].status, StepStatus::Done);

        // A later transition must not duplicate the entry.
        t.error("ghost", None);
        assert_eq!(t.snapshot().len(), 1);
        assert_eq!(t.snapshot()[0].status, StepStatus::Error);
    }

    #[test]
    fn empty_detail_does_not_clear_previous() {
        let mut t = StepTracker::new("run");
        t.register("a", "A");
        t.complete("a", Some("v1.2.0"));
        t.transition("a", StepStatus::Done, Some("  "));
        t.transition("a", StepStatus::Done, None);
        assert_eq!(t.snapshot()[0].detail.as_deref(), Some("v1.2.0"));
    }

    #[test]
    fn detail_latest_non_empty_wins() {
        let mut t = StepTracker::new("run");
        t.register("a", "A");
        t.start("a");
        t.complete("a", Some("first"));
        t.complete("a", Some("second"));
        assert_eq!(t.snapshot()[0].detail.as_deref(), Some("second"));
    }

    #[test]
    fn terminal_states_only_change_on_explicit_transition() {
        let mut t = StepTracker::new("run");
        t.register("a", "A");
        t.complete("a", None);
        assert!(t.snapshot()[0].status.is_terminal());

        // Explicit overwrite is allowed; nothing reverts implicitly.
        t.skip("a", Some("changed my mind"));
        assert_eq!(t.snapshot()[0].status, StepStatus::Skipped);
    }
}
