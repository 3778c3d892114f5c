//! Generator driver
//!
//! Selects entities by name, assembles their methods and joins them under one
//! preamble. The result passes through the output checker; a file that would
//! not parse as Go is never returned.

use tracing::{debug, info};

use crate::assembler::{assemble, Procedure};
use crate::error::ValidgenResult;
use crate::format::format_source;
use crate::models::{EntityDecl, PackageDecl};
use crate::render::{render_preamble, RenderConfig};

/// Entities to generate for, in the order of `selected`.
///
/// Each name picks the first entity declared with it. Repeated names are
/// taken once, at their first position; names with no entity are skipped.
pub fn select_entities<'a>(pkg: &'a PackageDecl, selected: &[String]) -> Vec<&'a EntityDecl> {
    let mut seen: Vec<&str> = Vec::new();
    let mut entities = Vec::new();
    for name in selected {
        if seen.contains(&name.as_str()) {
            continue;
        }
        seen.push(name);
        match pkg.entity(name) {
            Some(entity) => entities.push(entity),
            None => debug!(name = %name, package = %pkg.name, "no struct with this name, skipping"),
        }
    }
    entities
}

/// Generate the complete output file for the selected entities
pub fn generate(pkg: &PackageDecl, selected: &[String], config: &RenderConfig) -> ValidgenResult<String> {
    let entities = select_entities(pkg, selected);
    info!(
        package = %pkg.name,
        requested = selected.len(),
        matched = entities.len(),
        "generating {}() methods",
        config.method_name
    );

    let procedures = entities
        .into_iter()
        .map(assemble)
        .collect::<ValidgenResult<Vec<Procedure>>>()?;
    let import_errors = procedures.iter().any(Procedure::has_guards);

    let mut out = render_preamble(&pkg.name, &selected.join(","), import_errors);
    for procedure in &procedures {
        out.push('\n');
        out.push_str(&procedure.render(config));
    }

    format_source(&out)
}
