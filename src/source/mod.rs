//! Declaration source
//!
//! Reads a Go file and produces the [`PackageDecl`] the generator consumes:
//! the package name plus every top-level struct in source order.

pub(crate) mod lexer;
mod parser;
pub mod struct_tag;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ValidgenResult;
use crate::models::PackageDecl;

pub use lexer::unquote;

/// Parse Go source text. `path` is used for diagnostics and output placement.
pub fn parse_source(src: &str, path: &Path, tag_key: &str) -> ValidgenResult<PackageDecl> {
    let (name, entities) = parser::Parser::new(src, path)?.parse_file(tag_key)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(
        package = %name,
        file = %path.display(),
        entities = entities.len(),
        "parsed declaration source"
    );
    Ok(PackageDecl {
        name,
        dir,
        file,
        entities,
    })
}

/// Read and parse a Go source file
pub fn read_file(path: &Path, tag_key: &str) -> ValidgenResult<PackageDecl> {
    let src = fs::read_to_string(path)?;
    parse_source(&src, path, tag_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_source_dir_and_file() {
        let pkg = parse_source("package a\n", Path::new("models/pill.go"), "arg").unwrap();
        assert_eq!(pkg.name, "a");
        assert_eq!(pkg.dir, PathBuf::from("models"));
        assert_eq!(pkg.file, "pill.go");
        assert!(pkg.entities.is_empty());
    }

    #[test]
    fn test_parse_source_bare_file_name_uses_current_dir() {
        let pkg = parse_source("package a\n", Path::new("pill.go"), "arg").unwrap();
        assert_eq!(pkg.dir, PathBuf::from("."));
    }

    #[test]
    fn test_read_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_file(&dir.path().join("nope.go"), "arg");
        assert!(matches!(result, Err(crate::error::ValidgenError::Io(_))));
    }

    #[test]
    fn test_read_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.go");
        fs::write(&path, "package t\n\ntype T struct {\n\tA int `arg:\"required\"`\n}\n").unwrap();

        let pkg = read_file(&path, "arg").unwrap();
        assert_eq!(pkg.dir, dir.path());
        assert_eq!(pkg.entity("T").unwrap().fields[0].tag, "required");
    }
}
