//! Core data models for validgen
//!
//! Defines the declarations handed from the declaration source to the
//! generator:
//! - `PackageDecl`: one parsed Go source file
//! - `EntityDecl`: a struct type and its ordered fields
//! - `FieldDecl`: a field with its type descriptor and parsed constraints
//! - `Constraint`: one `name[=value]` token from a field tag

use serde::Serialize;
use std::path::PathBuf;

use crate::tag::parse_tag;
use crate::types::GoType;

/// Vocabulary of the tag mini-language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    /// `default=<value>`: assign when the field holds its zero value
    Default,
    /// `required` / `notzero`
    Required,
    /// `zero`
    Zero,
    /// `min` / `gte`
    Min,
    /// `max` / `lte`
    Max,
    Gt,
    Lt,
    Len,
    LenMin,
    LenMax,
    /// Anything else; kept but never compiled
    Unknown,
}

impl ConstraintKind {
    /// Resolve a constraint name, aliases included
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" => ConstraintKind::Default,
            "required" | "notzero" => ConstraintKind::Required,
            "zero" => ConstraintKind::Zero,
            "min" | "gte" => ConstraintKind::Min,
            "max" | "lte" => ConstraintKind::Max,
            "gt" => ConstraintKind::Gt,
            "lt" => ConstraintKind::Lt,
            "len" => ConstraintKind::Len,
            "lenmin" => ConstraintKind::LenMin,
            "lenmax" => ConstraintKind::LenMax,
            _ => ConstraintKind::Unknown,
        }
    }
}

/// A single `name[=value]` tag token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub name: String,
    /// Argument after the first `=`; empty for bare names
    pub value: String,
}

impl Constraint {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        ConstraintKind::from_name(&self.name)
    }
}

/// A field of a struct declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: GoType,
    /// Value of the configured struct-tag key (empty when absent)
    pub tag: String,
    /// Constraints in tag order
    pub constraints: Vec<Constraint>,
}

impl FieldDecl {
    /// Create a field, parsing its constraints from `tag`
    pub fn new(name: impl Into<String>, ty: GoType, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let constraints = parse_tag(&tag);
        Self {
            name: name.into(),
            ty,
            tag,
            constraints,
        }
    }
}

/// A struct type declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDecl {
    pub name: String,
    /// Type parameter names of a generic struct (`Pair[K, V]`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    pub fields: Vec<FieldDecl>,
}

impl EntityDecl {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            fields,
        }
    }

    /// Whether any field carries at least one constraint
    pub fn has_constraints(&self) -> bool {
        self.fields.iter().any(|f| !f.constraints.is_empty())
    }
}

/// A parsed Go source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDecl {
    /// Go package name from the `package` clause
    pub name: String,
    /// Directory containing the source file
    pub dir: PathBuf,
    /// Source file name (no directory)
    pub file: String,
    /// Struct declarations in source order
    pub entities: Vec<EntityDecl>,
}

impl PackageDecl {
    /// First entity with the given name
    pub fn entity(&self, name: &str) -> Option<&EntityDecl> {
        self.entities.iter().find(|e| e.name == name)
    }
}
