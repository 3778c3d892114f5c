//! Output placement, atomic writes and `--check` comparison

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use similar::TextDiff;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::ValidgenResult;
use crate::models::PackageDecl;

/// File-name suffix appended to the source stem by default
pub const DEFAULT_SUFFIX: &str = "_validgen.go";

/// Result of comparing generated text with the file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Missing,
    /// Existing file differs; carries a unified diff from disk to generated
    Stale { diff: String },
}

impl CheckOutcome {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, CheckOutcome::UpToDate)
    }
}

/// `<dir>/<stem><suffix>`, where the stem is the source file name without `.go`
pub fn default_output_path(pkg: &PackageDecl, suffix: &str) -> PathBuf {
    let stem = pkg.file.strip_suffix(".go").unwrap_or(&pkg.file);
    pkg.dir.join(format!("{}{}", stem, suffix))
}

/// Write `content` to `path` via a temp file in the same directory, then rename
pub fn write_atomic(path: &Path, content: &str) -> ValidgenResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), bytes = content.len(), "wrote generated file");
    Ok(())
}

/// Unified diff from `old` to `new`, labelled with `path`
pub fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(
            &format!("a/{}", path.display()),
            &format!("b/{}", path.display()),
        )
        .to_string()
}

/// Compare generated text with the current content of `path`
pub fn check_output(path: &Path, generated: &str) -> ValidgenResult<CheckOutcome> {
    let existing = match fs::read_to_string(path) {
        Ok(existing) => existing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CheckOutcome::Missing),
        Err(e) => return Err(e.into()),
    };
    if existing == generated {
        Ok(CheckOutcome::UpToDate)
    } else {
        Ok(CheckOutcome::Stale {
            diff: unified_diff(path, &existing, generated),
        })
    }
}
