//! Locating the tool, the example models and the result directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// File stem of the CAD command-line executable inside a build directory.
pub const TOOL_STEM: &str = "VisualScriptCADCLI";

/// Resolved run locations.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    pub tool: PathBuf,
    pub examples: PathBuf,
    pub results: PathBuf,
}

/// Default tool path for a build directory, with the platform's executable suffix.
pub fn default_tool(build_dir: &Path) -> PathBuf {
    build_dir.join(format!("{}{}", TOOL_STEM, std::env::consts::EXE_SUFFIX))
}

/// Combine explicit overrides with the build-directory layout
/// (`<build>/VisualScriptCADCLI`, `<build>/Examples`, `<build>/TestResults`).
pub fn resolve(
    build_dir: Option<&Path>,
    tool: Option<&Path>,
    examples: Option<&Path>,
    results: Option<&Path>,
) -> Result<RunPaths> {
    Ok(RunPaths {
        tool: pick(tool, build_dir, default_tool, "cli")?,
        examples: pick(examples, build_dir, |b| b.join("Examples"), "examples")?,
        results: pick(results, build_dir, |b| b.join("TestResults"), "results")?,
    })
}

fn pick(
    explicit: Option<&Path>,
    build_dir: Option<&Path>,
    default: impl Fn(&Path) -> PathBuf,
    flag: &str,
) -> Result<PathBuf> {
    match (explicit, build_dir) {
        (Some(p), _) => Ok(p.to_path_buf()),
        (None, Some(build)) => Ok(default(build)),
        (None, None) => bail!("no {} path: pass --build-dir or --{}", flag, flag),
    }
}

/// The tool and the example directory must exist before anything runs.
pub fn check_inputs(paths: &RunPaths) -> Result<()> {
    if !paths.tool.is_file() {
        bail!("tool not found: {}", paths.tool.display());
    }
    if !paths.examples.is_dir() {
        bail!("examples directory not found: {}", paths.examples.display());
    }
    Ok(())
}
