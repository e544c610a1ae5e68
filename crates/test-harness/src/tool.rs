//! The external CAD tool, seen as a narrow blocking collaborator.
//!
//! [`CliExportTool`] runs the real executable; [`MockExportTool`] is a
//! deterministic test double that writes OBJ/MTL files itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use mesh_types::GeometryModel;
use tracing::{debug, info};

/// Command literal for "open a model and export it as OBJ".
pub const EXPORT_COMMAND: &str = "open_export_obj";

/// Errors from invoking the external tool.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("failed to launch {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("tool exited with status {code}")]
    NonZeroExit { code: i32 },

    #[error("tool terminated without an exit status")]
    Terminated,

    #[error("tool output not produced: {message}")]
    Output { message: String },
}

/// Runs `<command> <input> <out_dir> <base_name>` and blocks until it exits.
pub trait ExportTool {
    /// Returns the process exit code; `0` means the export succeeded.
    fn run_export(
        &mut self,
        command: &str,
        input: &Path,
        out_dir: &Path,
        base_name: &str,
    ) -> Result<i32, ToolError>;
}

/// Spawns the CAD command-line executable.
#[derive(Debug, Clone)]
pub struct CliExportTool {
    program: PathBuf,
}

impl CliExportTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ExportTool for CliExportTool {
    fn run_export(
        &mut self,
        command: &str,
        input: &Path,
        out_dir: &Path,
        base_name: &str,
    ) -> Result<i32, ToolError> {
        info!(
            program = %self.program.display(),
            command,
            input = %input.display(),
            "running export tool"
        );
        let status = Command::new(&self.program)
            .arg(command)
            .arg(input)
            .arg(out_dir)
            .arg(base_name)
            .status()
            .map_err(|e| ToolError::Spawn {
                program: self.program.display().to_string(),
                message: e.to_string(),
            })?;
        debug!(?status, "export tool exited");
        status.code().ok_or(ToolError::Terminated)
    }
}

/// What [`MockExportTool`] does for one input file.
#[derive(Debug, Clone)]
pub enum MockExport {
    /// Write the model as `<base>.obj` / `<base>.mtl` and exit 0.
    Model(GeometryModel),
    /// Write the given texts verbatim and exit 0.
    Raw { mtl: String, obj: String },
    /// Exit with this code without writing anything.
    Exit(i32),
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportCall {
    pub command: String,
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub base_name: String,
}

/// Deterministic test double for the CAD tool.
///
/// Behaviour is keyed by the input file name. Unknown inputs exit with
/// status 1, as the real tool does when it cannot open a file.
#[derive(Debug, Default)]
pub struct MockExportTool {
    exports: HashMap<String, MockExport>,
    calls: Vec<ExportCall>,
}

impl MockExportTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, input_name: &str, model: GeometryModel) -> Self {
        self.exports
            .insert(input_name.to_string(), MockExport::Model(model));
        self
    }

    pub fn with_raw(mut self, input_name: &str, mtl: &str, obj: &str) -> Self {
        self.exports.insert(
            input_name.to_string(),
            MockExport::Raw {
                mtl: mtl.to_string(),
                obj: obj.to_string(),
            },
        );
        self
    }

    pub fn with_exit(mut self, input_name: &str, code: i32) -> Self {
        self.exports
            .insert(input_name.to_string(), MockExport::Exit(code));
        self
    }

    /// Invocations so far, in order.
    pub fn calls(&self) -> &[ExportCall] {
        &self.calls
    }
}

fn write_output(path: PathBuf, text: &str) -> Result<(), ToolError> {
    std::fs::write(&path, text).map_err(|e| ToolError::Output {
        message: format!("{}: {}", path.display(), e),
    })
}

impl ExportTool for MockExportTool {
    fn run_export(
        &mut self,
        command: &str,
        input: &Path,
        out_dir: &Path,
        base_name: &str,
    ) -> Result<i32, ToolError> {
        self.calls.push(ExportCall {
            command: command.to_string(),
            input: input.to_path_buf(),
            out_dir: out_dir.to_path_buf(),
            base_name: base_name.to_string(),
        });

        if command != EXPORT_COMMAND {
            return Ok(2);
        }
        let key = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.exports.get(&key) {
            Some(MockExport::Model(model)) => {
                obj_format::save_model(model, out_dir, base_name).map_err(|e| {
                    ToolError::Output {
                        message: e.to_string(),
                    }
                })?;
                Ok(0)
            }
            Some(MockExport::Raw { mtl, obj }) => {
                write_output(out_dir.join(format!("{}.mtl", base_name)), mtl)?;
                write_output(out_dir.join(format!("{}.obj", base_name)), obj)?;
                Ok(0)
            }
            Some(MockExport::Exit(code)) => Ok(*code),
            None => Ok(1),
        }
    }
}
