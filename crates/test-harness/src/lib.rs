//! Regression harness for OBJ exports of the CAD tool.
//!
//! Drives the tool over a table of example models, imports every exported
//! mesh, and compares its bounding box and surface area with known-good
//! values.
//!
//! # Key Components
//!
//! - [`ScenarioRunner`] — Runs each fixture through export, import and comparison
//! - [`fixtures`] — Reference values per example model
//! - [`oracle`] — Comparison functions returning pass/fail verdicts
//! - [`report`] — Plain-text run reports
//! - [`tool`] — The external tool and its test double
//! - [`helpers`] — Error type and reference model builders

pub mod fixtures;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod result_dir;
pub mod scenario;
pub mod tool;

pub use fixtures::{ExpectedResult, FixtureTable};
pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::RunReport;
pub use result_dir::ResultDir;
pub use scenario::{HarnessConfig, RunSummary, ScenarioOutcome, ScenarioRunner, ScenarioState};
pub use tool::{CliExportTool, ExportTool, MockExportTool, ToolError, EXPORT_COMMAND};
