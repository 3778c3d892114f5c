//! One generator run: read the source, generate, then write, print or check

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::emitter::{check_output, default_output_path, write_atomic, CheckOutcome};
use crate::error::ValidgenResult;
use crate::generator::generate;
use crate::models::PackageDecl;
use crate::source::read_file;

/// What to do with the generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write the output file atomically
    #[default]
    Write,
    /// Print the generated code instead of writing it
    Stdout,
    /// Compare with the existing output file
    Check,
    /// Skip generation; return the parsed declarations
    Dump,
}

/// Inputs of a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub source: PathBuf,
    /// Entity names, in output order
    pub types: Vec<String>,
    /// Output path; defaults to `<dir>/<stem><suffix>`
    pub out: Option<PathBuf>,
    pub mode: OutputMode,
}

impl GenerateRequest {
    pub fn new(source: impl Into<PathBuf>, types: Vec<String>) -> Self {
        Self {
            source: source.into(),
            types,
            out: None,
            mode: OutputMode::Write,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_out(mut self, out: impl Into<PathBuf>) -> Self {
        self.out = Some(out.into());
        self
    }
}

/// What a run produced
#[derive(Debug)]
pub enum RunOutcome {
    Written { path: PathBuf },
    Printed { code: String },
    Checked { path: PathBuf, outcome: CheckOutcome },
    Dumped { package: PackageDecl },
}

/// Split a `--type` value on commas, dropping empty names
pub fn parse_type_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn output_path(request: &GenerateRequest, pkg: &PackageDecl, config: &Config) -> PathBuf {
    request
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(pkg, &config.generate.suffix))
}

/// Execute a request. Nothing is written unless generation fully succeeds.
pub fn run(request: &GenerateRequest, config: &Config) -> ValidgenResult<RunOutcome> {
    let pkg = read_file(&request.source, &config.generate.tag)?;
    debug!(
        package = %pkg.name,
        structs = ?pkg.entities.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        "declarations"
    );

    if request.mode == OutputMode::Dump {
        return Ok(RunOutcome::Dumped { package: pkg });
    }

    let code = generate(&pkg, &request.types, &config.render_config())?;
    match request.mode {
        OutputMode::Stdout => Ok(RunOutcome::Printed { code }),
        OutputMode::Check => {
            let path = output_path(request, &pkg, config);
            let outcome = check_output(&path, &code)?;
            info!(path = %path.display(), up_to_date = outcome.is_up_to_date(), "checked output");
            Ok(RunOutcome::Checked { path, outcome })
        }
        OutputMode::Write | OutputMode::Dump => {
            let path = output_path(request, &pkg, config);
            write_atomic(&path, &code)?;
            Ok(RunOutcome::Written { path })
        }
    }
}

/// Directory holding `source`, for project config lookup
pub fn source_dir(source: &Path) -> &Path {
    match source.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
