//! Statement shapes and their Go rendering
//!
//! The generator emits exactly four shapes: the method header, the
//! default-if-zero assignment, the guard with an early error return, and the
//! footer. Each is a pure function of its inputs and a [`RenderConfig`].

use std::cmp::Ordering;
use std::fmt;

use crate::escaping::quote_go_string;

/// Name recorded in the generated-code provenance comment
pub const GENERATOR_NAME: &str = "validgen";

/// Package providing the error constructor used by guards
pub const ERRORS_PACKAGE: &str = "errors";

/// Parameters shared by every rendering function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Name of the generated method
    pub method_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            method_name: "Valid".to_string(),
        }
    }
}

/// Comparison operator of a guard's violation condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    /// Whether `subject <op> operand` holds, given `subject.cmp(operand)`
    pub fn violated_by(self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Ne => ordering != Ordering::Equal,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Ge => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `if field == zero { field = value }`
    DefaultIfZero {
        field: String,
        zero: String,
        value: String,
    },
    /// `if subject <op> operand { return errors.New(message) }`
    ///
    /// `message` is plain text; it is escaped when rendered.
    Guard {
        subject: String,
        op: CmpOp,
        operand: String,
        message: String,
    },
}

impl Statement {
    pub fn is_guard(&self) -> bool {
        matches!(self, Statement::Guard { .. })
    }

    pub fn render(&self, w: &mut CodeWriter) {
        match self {
            Statement::DefaultIfZero { field, zero, value } => {
                w.open(&format!("if {} == {} {{", field, zero));
                w.line(&format!("{} = {}", field, value));
                w.close("}");
            }
            Statement::Guard {
                subject,
                op,
                operand,
                message,
            } => {
                w.open(&format!("if {} {} {} {{", subject, op, operand));
                w.line(&format!(
                    "return {}.New({})",
                    ERRORS_PACKAGE,
                    quote_go_string(message)
                ));
                w.close("}");
            }
        }
    }
}

/// Tab-indented line buffer
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push('\t');
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write a line and indent everything after it
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent, then write a line
    pub fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Provenance comment, package clause and imports
pub fn render_preamble(package: &str, types: &str, import_errors: bool) -> String {
    let mut w = CodeWriter::new();
    w.line(&format!(
        "// Code generated by \"{} -type {}\"; DO NOT EDIT.",
        GENERATOR_NAME, types
    ));
    w.blank();
    w.line(&format!("package {}", package));
    if import_errors {
        w.blank();
        w.line(&format!("import {}", quote_go_string(ERRORS_PACKAGE)));
    }
    w.finish()
}

/// `func (p *Pill) Valid() error {`
pub fn render_header(w: &mut CodeWriter, receiver: &str, receiver_type: &str, config: &RenderConfig) {
    w.open(&format!(
        "func ({} *{}) {}() error {{",
        receiver, receiver_type, config.method_name
    ));
}

pub fn render_footer(w: &mut CodeWriter) {
    w.line("return nil");
    w.close("}");
}
