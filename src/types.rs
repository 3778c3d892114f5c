//! Go type descriptors and the type classifier
//!
//! The declaration source turns every field type into a [`GoType`] once; the
//! classifier then works on the variant instead of matching string prefixes,
//! so a user type such as `integer` never lands in the integer category.

use std::fmt;

use serde::Serialize;

/// Direction of a Go channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChanDir {
    /// `chan T`
    #[default]
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A parameter or result in a function type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: GoType,
    /// `...T` (only valid on the final parameter)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub variadic: bool,
}

/// A field of an anonymous struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructField {
    /// `None` for embedded fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: GoType,
    /// Raw tag literal, quotes included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Structured descriptor of a Go type expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GoType {
    /// Predeclared, local or qualified named type, optionally instantiated
    Named {
        #[serde(skip_serializing_if = "Option::is_none")]
        package: Option<String>,
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        args: Vec<GoType>,
    },
    Pointer {
        elem: Box<GoType>,
    },
    Slice {
        elem: Box<GoType>,
    },
    /// Fixed-length array; `len` is the raw length expression
    Array {
        len: String,
        elem: Box<GoType>,
    },
    Map {
        key: Box<GoType>,
        value: Box<GoType>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<GoType>,
    },
    Func {
        params: Vec<Param>,
        results: Vec<Param>,
    },
    /// Interface type; each element is the source text of one method or
    /// embedded constraint
    Interface {
        methods: Vec<String>,
    },
    Struct {
        fields: Vec<StructField>,
    },
}

impl GoType {
    /// Unqualified named type such as `int` or `Pill`
    pub fn named(name: impl Into<String>) -> Self {
        GoType::Named {
            package: None,
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Package-qualified named type such as `time.Time`
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        GoType::Named {
            package: Some(package.into()),
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn pointer(elem: GoType) -> Self {
        GoType::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: GoType) -> Self {
        GoType::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn array(len: impl Into<String>, elem: GoType) -> Self {
        GoType::Array {
            len: len.into(),
            elem: Box::new(elem),
        }
    }

    pub fn map(key: GoType, value: GoType) -> Self {
        GoType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: GoType) -> Self {
        GoType::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Semantic category of this type
    pub fn category(&self) -> TypeCategory {
        classify(self)
    }

    /// Go zero-value literal for this type
    pub fn zero_value(&self) -> String {
        zero_value(self)
    }

    /// Name an embedded field of this type receives (`*pkg.T` embeds as `T`)
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            GoType::Named { name, .. } => Some(name),
            GoType::Pointer { elem } => elem.embedded_name(),
            _ => None,
        }
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[Param]) -> fmt::Result {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if let Some(name) = &param.name {
            write!(f, "{} ", name)?;
        }
        if param.variadic {
            f.write_str("...")?;
        }
        write!(f, "{}", param.ty)?;
    }
    Ok(())
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoType::Named {
                package,
                name,
                args,
            } => {
                if let Some(package) = package {
                    write!(f, "{}.", package)?;
                }
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str("]")?;
                }
                Ok(())
            }
            GoType::Pointer { elem } => write!(f, "*{}", elem),
            GoType::Slice { elem } => write!(f, "[]{}", elem),
            GoType::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            GoType::Map { key, value } => write!(f, "map[{}]{}", key, value),
            GoType::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            GoType::Func { params, results } => {
                f.write_str("func(")?;
                write_params(f, params)?;
                f.write_str(")")?;
                match results.as_slice() {
                    [] => Ok(()),
                    [single] if single.name.is_none() => write!(f, " {}", single.ty),
                    _ => {
                        f.write_str(" (")?;
                        write_params(f, results)?;
                        f.write_str(")")
                    }
                }
            }
            GoType::Interface { methods } => write!(f, "interface{{{}}}", methods.join("; ")),
            GoType::Struct { fields } => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    if let Some(name) = &field.name {
                        write!(f, "{} ", name)?;
                    }
                    write!(f, "{}", field.ty)?;
                    if let Some(tag) = &field.tag {
                        write!(f, " {}", tag)?;
                    }
                }
                f.write_str("}")
            }
        }
    }
}

/// Semantic category of a field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Integer,
    Unsigned,
    Float,
    Complex,
    Boolean,
    String,
    /// Slices and fixed-length arrays
    Slice,
    Map,
    Channel,
    Function,
    Interface,
    Pointer,
    Other,
}

impl TypeCategory {
    /// Union of the integer, unsigned, float and complex categories
    pub fn is_number(self) -> bool {
        matches!(
            self,
            TypeCategory::Integer
                | TypeCategory::Unsigned
                | TypeCategory::Float
                | TypeCategory::Complex
        )
    }

    /// Types that support `len()` constraints
    pub fn is_sequence(self) -> bool {
        self == TypeCategory::Slice
    }
}

/// Classify a type descriptor. Total over every descriptor.
pub fn classify(ty: &GoType) -> TypeCategory {
    match ty {
        GoType::Named {
            package: None,
            name,
            args,
        } if args.is_empty() => classify_predeclared(name),
        GoType::Named { .. } | GoType::Struct { .. } => TypeCategory::Other,
        GoType::Pointer { .. } => TypeCategory::Pointer,
        GoType::Slice { .. } | GoType::Array { .. } => TypeCategory::Slice,
        GoType::Map { .. } => TypeCategory::Map,
        GoType::Chan { .. } => TypeCategory::Channel,
        GoType::Func { .. } => TypeCategory::Function,
        GoType::Interface { .. } => TypeCategory::Interface,
    }
}

fn classify_predeclared(name: &str) -> TypeCategory {
    match name {
        "int" | "int8" | "int16" | "int32" | "int64" | "byte" => TypeCategory::Integer,
        "uint" | "uint8" | "uint16" | "uint32" | "uint64" | "uintptr" | "rune" => {
            TypeCategory::Unsigned
        }
        "float32" | "float64" => TypeCategory::Float,
        "complex64" | "complex128" => TypeCategory::Complex,
        "bool" => TypeCategory::Boolean,
        "string" => TypeCategory::String,
        "any" | "error" => TypeCategory::Interface,
        _ => TypeCategory::Other,
    }
}

/// Zero-value literal of a type, never empty.
///
/// Arrays count as sequences for the length constraints but are not
/// nillable, so they take the `*new(T)` fallback.
pub fn zero_value(ty: &GoType) -> String {
    if matches!(ty, GoType::Array { .. }) {
        return format!("*new({})", ty);
    }
    match classify(ty) {
        c if c.is_number() => "0".to_string(),
        TypeCategory::Boolean => "false".to_string(),
        TypeCategory::String => "\"\"".to_string(),
        TypeCategory::Slice
        | TypeCategory::Map
        | TypeCategory::Channel
        | TypeCategory::Function
        | TypeCategory::Interface
        | TypeCategory::Pointer => "nil".to_string(),
        _ => format!("*new({})", ty),
    }
}
