//! ScenarioRunner — export, import, measure and compare, one model at a time.
//!
//! Each scenario walks `Pending → Exported → Imported → Compared` and ends in
//! `Passed`, `Failed` (values outside tolerance) or `Errored` (tool, import or
//! empty-model failure). Scenarios run strictly in fixture order.

use std::fmt;
use std::path::PathBuf;

use mesh_measure::{bounding_box, surface_area, MeshStats, Tolerance};
use mesh_types::BoundingBox;
use obj_format::{import_model, ValidationNote};
use tracing::{info, instrument, warn};

use crate::fixtures::{ExpectedResult, FixtureTable};
use crate::helpers::HarnessError;
use crate::oracle::{run_geometry_checks, OracleVerdict};
use crate::result_dir::ResultDir;
use crate::tool::{ExportTool, ToolError, EXPORT_COMMAND};

/// Run-wide settings, fixed at construction.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory holding the input models named by the fixtures.
    pub examples_dir: PathBuf,
    /// Directory the tool exports into.
    pub results_dir: PathBuf,
    pub command: String,
    pub tolerance: Tolerance,
    /// Stop at the first scenario that does not pass.
    pub fail_fast: bool,
    /// Leave the result directory in place after a passing run.
    pub keep_results: bool,
}

impl HarnessConfig {
    pub fn new(examples_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            examples_dir: examples_dir.into(),
            results_dir: results_dir.into(),
            command: EXPORT_COMMAND.to_string(),
            tolerance: Tolerance::default(),
            fail_fast: false,
            keep_results: false,
        }
    }

    /// Takes a [`Tolerance`], so the epsilon was validated by
    /// [`Tolerance::new`].
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_keep_results(mut self, keep_results: bool) -> Self {
        self.keep_results = keep_results;
        self
    }
}

/// Lifecycle states of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    Pending,
    Exported,
    Imported,
    Compared,
    Passed,
    Failed,
    Errored,
}

impl ScenarioState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::Errored)
    }
}

impl fmt::Display for ScenarioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Exported => "Exported",
            Self::Imported => "Imported",
            Self::Compared => "Compared",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Errored => "Errored",
        };
        f.write_str(label)
    }
}

/// Everything learned while running one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    /// Every state entered, starting with `Pending`.
    pub trail: Vec<ScenarioState>,
    pub bounding_box: Option<BoundingBox>,
    pub surface_area: Option<f64>,
    pub stats: Option<MeshStats>,
    pub verdicts: Vec<OracleVerdict>,
    pub notes: Vec<ValidationNote>,
    /// Set for every terminal state other than `Passed`.
    pub error: Option<HarnessError>,
}

impl ScenarioOutcome {
    fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            trail: vec![ScenarioState::Pending],
            bounding_box: None,
            surface_area: None,
            stats: None,
            verdicts: Vec::new(),
            notes: Vec::new(),
            error: None,
        }
    }

    fn advance(&mut self, state: ScenarioState) {
        self.trail.push(state);
    }

    pub fn state(&self) -> ScenarioState {
        self.trail
            .last()
            .copied()
            .unwrap_or(ScenarioState::Pending)
    }

    pub fn passed(&self) -> bool {
        self.state() == ScenarioState::Passed
    }

    /// Human-readable reason for a non-passing outcome.
    pub fn reason(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// Outcomes of a run, in execution order.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcomes: Vec<ScenarioOutcome>,
    /// Fixtures never started because the run stopped early.
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.skipped.is_empty() && self.outcomes.iter().all(|o| o.passed())
    }

    /// Process exit status: 0 iff every scenario passed.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn first_failure(&self) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| !o.passed())
    }

    pub fn count(&self, state: ScenarioState) -> usize {
        self.outcomes.iter().filter(|o| o.state() == state).count()
    }
}

/// Drives every fixture through the export tool and the comparison.
pub struct ScenarioRunner<T: ExportTool> {
    config: HarnessConfig,
    fixtures: FixtureTable,
    tool: T,
}

impl<T: ExportTool> ScenarioRunner<T> {
    pub fn new(config: HarnessConfig, fixtures: FixtureTable, tool: T) -> Self {
        Self {
            config,
            fixtures,
            tool,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn fixtures(&self) -> &FixtureTable {
        &self.fixtures
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn into_tool(self) -> T {
        self.tool
    }

    /// Run one scenario to a terminal state.
    #[instrument(skip_all, fields(scenario = %fixture.name))]
    pub fn run_scenario(&mut self, fixture: &ExpectedResult) -> ScenarioOutcome {
        let mut outcome = ScenarioOutcome::pending(&fixture.name);
        match self.drive(fixture, &mut outcome) {
            Ok(()) => {
                info!("scenario passed");
            }
            Err(e) => {
                let state = match e {
                    HarnessError::ComparisonFailure { .. } => ScenarioState::Failed,
                    _ => ScenarioState::Errored,
                };
                warn!(state = %state, kind = e.kind(), error = %e, "scenario did not pass");
                outcome.advance(state);
                outcome.error = Some(e);
            }
        }
        outcome
    }

    fn drive(
        &mut self,
        fixture: &ExpectedResult,
        outcome: &mut ScenarioOutcome,
    ) -> Result<(), HarnessError> {
        let model_name = fixture.model_name();
        let input = self.config.examples_dir.join(&fixture.name);
        let out_dir = &self.config.results_dir;

        info!("{}: {}", self.config.command, fixture.name);
        let code = self
            .tool
            .run_export(&self.config.command, &input, out_dir, model_name)?;
        if code != 0 {
            return Err(ToolError::NonZeroExit { code }.into());
        }
        outcome.advance(ScenarioState::Exported);

        let mtl_path = out_dir.join(format!("{}.mtl", model_name));
        let obj_path = out_dir.join(format!("{}.obj", model_name));
        let imported = import_model(&mtl_path, &obj_path)?;
        outcome.notes = imported.notes;
        outcome.stats = Some(MeshStats::of(&imported.model));
        outcome.advance(ScenarioState::Imported);

        let model = imported.model;
        let bb = bounding_box(&model)?;
        let area = surface_area(&model);
        outcome.bounding_box = Some(bb);
        outcome.surface_area = Some(area);
        outcome.advance(ScenarioState::Compared);

        outcome.verdicts = run_geometry_checks(&bb, area, fixture, self.config.tolerance);
        let failed: Vec<String> = outcome
            .verdicts
            .iter()
            .filter(|v| !v.passed)
            .map(|v| format!("{} {}", v.oracle_name, v.detail))
            .collect();
        if !failed.is_empty() {
            return Err(HarnessError::ComparisonFailure { checks: failed });
        }

        outcome.advance(ScenarioState::Passed);
        Ok(())
    }

    /// Run every fixture in order. With `fail_fast`, stop after the first
    /// scenario that does not pass and list the rest as skipped.
    pub fn run_all(&mut self) -> RunSummary {
        let fixtures = self.fixtures.entries().to_vec();
        let mut outcomes = Vec::with_capacity(fixtures.len());
        let mut skipped = Vec::new();

        for (i, fixture) in fixtures.iter().enumerate() {
            let outcome = self.run_scenario(fixture);
            let stop = self.config.fail_fast && !outcome.passed();
            outcomes.push(outcome);
            if stop {
                skipped.extend(fixtures[i + 1..].iter().map(|f| f.name.clone()));
                break;
            }
        }

        let summary = RunSummary { outcomes, skipped };
        info!(
            passed = summary.count(ScenarioState::Passed),
            failed = summary.count(ScenarioState::Failed),
            errored = summary.count(ScenarioState::Errored),
            skipped = summary.skipped.len(),
            "run finished"
        );
        summary
    }

    /// Prepare a fresh result directory, run every fixture, and remove the
    /// directory again when all scenarios passed (unless `keep_results`).
    pub fn run(&mut self) -> Result<RunSummary, HarnessError> {
        let dir = ResultDir::prepare(&self.config.results_dir)?;
        let summary = self.run_all();
        if summary.all_passed() && !self.config.keep_results {
            dir.remove()?;
        }
        Ok(summary)
    }
}
