//! Terminal rendering of the pipeline tracker.
//!
//! The orchestrator hands us a fresh snapshot after every mutation; on a
//! terminal we redraw the block in place, otherwise we stay quiet and print
//! one final snapshot when the run is over.

use specify_core::tracker::{StepStatus, StepTracker};
use std::io::{IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const BOLD_CYAN: &str = "\x1b[1;36m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";

pub struct TrackerRenderer {
    live: bool,
    lines_drawn: usize,
}

impl TrackerRenderer {
    pub fn new() -> Self {
        Self {
            live: std::io::stdout().is_terminal(),
            lines_drawn: 0,
        }
    }

    /// Redraw the tracker in place. No-op when stdout is not a terminal.
    pub fn draw(&mut self, tracker: &StepTracker) {
        if !self.live {
            return;
        }
        let lines = render_lines(tracker, true);
        let mut out = std::io::stdout().lock();
        if self.lines_drawn > 0 {
            let _ = write!(out, "\x1b[{}A", self.lines_drawn);
        }
        for line in &lines {
            let _ = writeln!(out, "\x1b[2K{line}");
        }
        let _ = out.flush();
        self.lines_drawn = lines.len();
    }

    /// Print the final snapshot. On a terminal the live block is already on
    /// screen; for pipes this is the only output.
    pub fn finish(&mut self, tracker: &StepTracker) {
        if self.live {
            self.draw(tracker);
            return;
        }
        for line in render_lines(tracker, false) {
            println!("{line}");
        }
    }
}

fn render_lines(tracker: &StepTracker, color: bool) -> Vec<String> {
    let paint = |code: &str, text: &str| {
        if color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    };

    let mut lines = vec![paint(BOLD_CYAN, tracker.title())];
    for step in tracker.snapshot() {
        let glyph = match step.status {
            StepStatus::Done => paint(GREEN, "●"),
            StepStatus::Pending => paint(DIM, "○"),
            StepStatus::Running => paint(CYAN, "○"),
            StepStatus::Error => paint(RED, "●"),
            StepStatus::Skipped => paint(YELLOW, "○"),
        };
        let detail = match &step.detail {
            Some(d) => format!(" ({d})"),
            None => String::new(),
        };
        let row = format!("{}{}", step.label, detail);
        // Pending rows are dimmed as a whole; others show the label plain
        // with a parenthetical detail.
        let row = if step.status == StepStatus::Pending {
            paint(DIM, &row)
        } else {
            row
        };
        lines.push(format!("  {glyph} {row}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_shows_labels_and_details() {
        let mut t = StepTracker::new("Initialize Specify Project");
        t.register("fetch", "Fetch latest release");
        t.register("download", "Download template");
        t.complete("fetch", Some("v1.2.0"));

        let lines = render_lines(&t, false);
        assert_eq!(lines[0], "Initialize Specify Project");
        assert_eq!(lines[1], "  ● Fetch latest release (v1.2.0)");
        assert_eq!(lines[2], "  ○ Download template");
    }

    #[test]
    fn colored_rendering_dims_pending_rows() {
        let mut t = StepTracker::new("run");
        t.register("a", "Still waiting");
        let lines = render_lines(&t, true);
        assert!(lines[1].contains(DIM));
        assert!(lines[1].contains("Still waiting"));
    }
}
