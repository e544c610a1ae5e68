//! Plain-text run reports.
//!
//! One line per scenario with its verdict, followed by the measured values,
//! any validation notes and the failure reason.

use std::fmt;

use crate::oracle::fmt_box;
use crate::scenario::{RunSummary, ScenarioOutcome, ScenarioState};

/// A complete report over one run.
pub struct RunReport<'a> {
    pub summary: &'a RunSummary,
    pub tolerance: f64,
}

impl<'a> RunReport<'a> {
    pub fn new(summary: &'a RunSummary, tolerance: f64) -> Self {
        Self { summary, tolerance }
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Compatibility Test Report ===\n\n");
        out.push_str(&format!(
            "Scenarios ({} run, tolerance {}):\n",
            self.summary.outcomes.len(),
            self.tolerance,
        ));

        for outcome in &self.summary.outcomes {
            push_outcome(&mut out, outcome);
        }

        if !self.summary.skipped.is_empty() {
            out.push_str(&format!(
                "\nSkipped ({}): {}\n",
                self.summary.skipped.len(),
                self.summary.skipped.join(", "),
            ));
        }

        out.push_str(&format!(
            "\nTotals: {} passed, {} failed, {} errored, {} skipped\n",
            self.summary.count(ScenarioState::Passed),
            self.summary.count(ScenarioState::Failed),
            self.summary.count(ScenarioState::Errored),
            self.summary.skipped.len(),
        ));
        let result = if self.summary.all_passed() {
            "PASS"
        } else {
            "FAIL"
        };
        out.push_str(&format!("Result: {}\n", result));
        out
    }
}

fn push_outcome(out: &mut String, outcome: &ScenarioOutcome) {
    let status = match outcome.state() {
        ScenarioState::Passed => "PASS",
        ScenarioState::Failed => "FAIL",
        _ => "ERROR",
    };
    out.push_str(&format!("  [{}] {}\n", status, outcome.name));

    if let Some(bb) = &outcome.bounding_box {
        out.push_str(&format!("      Bounding Box: {}\n", fmt_box(bb)));
    }
    if let Some(area) = outcome.surface_area {
        out.push_str(&format!("      Surface Area: {:.6}\n", area));
    }
    if let Some(stats) = &outcome.stats {
        out.push_str(&format!(
            "      Mesh: {} vertices, {} faces, {} triangles",
            stats.vertex_count, stats.face_count, stats.triangle_count,
        ));
        if stats.degenerate_faces > 0 {
            out.push_str(&format!(", {} degenerate", stats.degenerate_faces));
        }
        if stats.unreferenced_vertices > 0 {
            out.push_str(&format!(", {} unreferenced", stats.unreferenced_vertices));
        }
        out.push('\n');
    }
    for note in &outcome.notes {
        out.push_str(&format!("      Note: {}\n", note));
    }
    if let Some(e) = &outcome.error {
        out.push_str(&format!("      {}: {}\n", e.kind(), e));
    }
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
