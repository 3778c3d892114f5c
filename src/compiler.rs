//! Constraint compiler
//!
//! Turns each (field, constraint) pair into at most one [`Statement`]. Guards
//! carry the violation condition, the negation of the constraint: `min=0`
//! compiles to "fail when less than 0". Constraints that do not apply to the
//! field's category, and unknown names, compile to nothing.

use tracing::trace;

use crate::escaping::quote_go_string;
use crate::models::{Constraint, ConstraintKind, FieldDecl};
use crate::render::{CmpOp, Statement};
use crate::types::TypeCategory;

/// Per-field data shared by all of the field's constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext<'a> {
    /// Field name as declared, used in messages
    pub name: &'a str,
    /// Selector expression, e.g. `p.Amount`
    pub access: String,
    pub category: TypeCategory,
    /// Zero-value literal of the field type
    pub zero: String,
}

impl<'a> FieldContext<'a> {
    pub fn new(field: &'a FieldDecl, receiver: &str) -> Self {
        Self {
            name: &field.name,
            access: format!("{}.{}", receiver, field.name),
            category: field.ty.category(),
            zero: field.ty.zero_value(),
        }
    }

    fn len_access(&self) -> String {
        format!("len({})", self.access)
    }

    fn guard(&self, subject: String, op: CmpOp, operand: &str, message: String) -> Statement {
        Statement::Guard {
            subject,
            op,
            operand: operand.to_string(),
            message,
        }
    }

    fn number_guard(&self, op: CmpOp, value: &str, relation: &str) -> Option<Statement> {
        self.category.is_number().then(|| {
            self.guard(
                self.access.clone(),
                op,
                value,
                format!("{} must {} {}", self.name, relation, value),
            )
        })
    }

    fn length_guard(&self, op: CmpOp, value: &str, relation: &str) -> Option<Statement> {
        self.category.is_sequence().then(|| {
            let message = if relation.is_empty() {
                format!("{} length must {}", self.name, value)
            } else {
                format!("{} length must {} {}", self.name, relation, value)
            };
            self.guard(self.len_access(), op, value, message)
        })
    }
}

/// Compile one constraint against a field
pub fn compile(ctx: &FieldContext<'_>, constraint: &Constraint) -> Option<Statement> {
    let value = constraint.value.as_str();
    match constraint.kind() {
        ConstraintKind::Default => {
            let value = if ctx.category == TypeCategory::String {
                quote_go_string(value)
            } else {
                value.to_string()
            };
            Some(Statement::DefaultIfZero {
                field: ctx.access.clone(),
                zero: ctx.zero.clone(),
                value,
            })
        }
        ConstraintKind::Required => Some(ctx.guard(
            ctx.access.clone(),
            CmpOp::Eq,
            &ctx.zero,
            format!("{} must not {}", ctx.name, ctx.zero),
        )),
        ConstraintKind::Zero => Some(ctx.guard(
            ctx.access.clone(),
            CmpOp::Ne,
            &ctx.zero,
            format!("{} must {}", ctx.name, ctx.zero),
        )),
        ConstraintKind::Min => ctx.number_guard(CmpOp::Lt, value, "greater than or equal"),
        ConstraintKind::Max => ctx.number_guard(CmpOp::Gt, value, "less than or equal"),
        ConstraintKind::Gt => ctx.number_guard(CmpOp::Le, value, "greater than"),
        ConstraintKind::Lt => ctx.number_guard(CmpOp::Ge, value, "less than"),
        ConstraintKind::Len => ctx.length_guard(CmpOp::Ne, value, ""),
        ConstraintKind::LenMin => ctx.length_guard(CmpOp::Lt, value, "greater than or equal"),
        ConstraintKind::LenMax => ctx.length_guard(CmpOp::Gt, value, "less than or equal"),
        ConstraintKind::Unknown => None,
    }
}

/// Compile every constraint of a field, in tag order
pub fn compile_field(field: &FieldDecl, receiver: &str) -> Vec<Statement> {
    let ctx = FieldContext::new(field, receiver);
    field
        .constraints
        .iter()
        .filter_map(|constraint| {
            let statement = compile(&ctx, constraint);
            if statement.is_none() {
                trace!(
                    field = %field.name,
                    constraint = %constraint.name,
                    category = ?ctx.category,
                    "constraint has no effect"
                );
            }
            statement
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GoType;

    fn field(name: &str, ty: GoType, tag: &str) -> FieldDecl {
        FieldDecl::new(name, ty, tag)
    }

    fn guard(subject: &str, op: CmpOp, operand: &str, message: &str) -> Statement {
        Statement::Guard {
            subject: subject.to_string(),
            op,
            operand: operand.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_required_string() {
        let f = field("Name", GoType::named("string"), "required");
        assert_eq!(
            compile_field(&f, "p"),
            vec![guard("p.Name", CmpOp::Eq, "\"\"", "Name must not \"\"")]
        );
    }

    #[test]
    fn test_notzero_is_required_alias() {
        let f = field("Color", GoType::named("int64"), "notzero");
        assert_eq!(
            compile_field(&f, "p"),
            vec![guard("p.Color", CmpOp::Eq, "0", "Color must not 0")]
        );
    }

    #[test]
    fn test_zero_constraint() {
        let f = field("P", GoType::pointer(GoType::named("int")), "zero");
        assert_eq!(
            compile_field(&f, "m"),
            vec![guard("m.P", CmpOp::Ne, "nil", "P must nil")]
        );
    }

    #[test]
    fn test_numeric_bounds() {
        let f = field("Amount", GoType::named("uint8"), "min=1,max=100,gt=0,lt=101");
        assert_eq!(
            compile_field(&f, "p"),
            vec![
                guard("p.Amount", CmpOp::Lt, "1", "Amount must greater than or equal 1"),
                guard("p.Amount", CmpOp::Gt, "100", "Amount must less than or equal 100"),
                guard("p.Amount", CmpOp::Le, "0", "Amount must greater than 0"),
                guard("p.Amount", CmpOp::Ge, "101", "Amount must less than 101"),
            ]
        );
    }

    #[test]
    fn test_gte_lte_aliases() {
        let f = field("F", GoType::named("float64"), "gte=0.5,lte=2");
        let statements = compile_field(&f, "t");
        assert_eq!(
            statements,
            vec![
                guard("t.F", CmpOp::Lt, "0.5", "F must greater than or equal 0.5"),
                guard("t.F", CmpOp::Gt, "2", "F must less than or equal 2"),
            ]
        );
    }

    #[test]
    fn test_numeric_constraints_skip_non_numbers() {
        let f = field("Name", GoType::named("string"), "min=1,max=3,gt=0,lt=9");
        assert!(compile_field(&f, "p").is_empty());
    }

    #[test]
    fn test_length_constraints_on_slice() {
        let f = field("SI", GoType::slice(GoType::named("int")), "len=2,lenmin=1,lenmax=4");
        assert_eq!(
            compile_field(&f, "m"),
            vec![
                guard("len(m.SI)", CmpOp::Ne, "2", "SI length must 2"),
                guard(
                    "len(m.SI)",
                    CmpOp::Lt,
                    "1",
                    "SI length must greater than or equal 1"
                ),
                guard(
                    "len(m.SI)",
                    CmpOp::Gt,
                    "4",
                    "SI length must less than or equal 4"
                ),
            ]
        );
    }

    #[test]
    fn test_length_constraints_apply_to_arrays() {
        let f = field("A", GoType::array("3", GoType::named("int")), "len=3");
        assert_eq!(compile_field(&f, "m").len(), 1);
    }

    #[test]
    fn test_length_constraints_skip_non_sequences() {
        for ty in [
            GoType::named("string"),
            GoType::map(GoType::named("int"), GoType::named("bool")),
            GoType::named("int"),
        ] {
            let f = field("X", ty, "len=2");
            assert!(compile_field(&f, "m").is_empty());
        }
    }

    #[test]
    fn test_default_quotes_strings_only() {
        let s = field("Greeting", GoType::named("string"), "default=hello");
        assert_eq!(
            compile_field(&s, "c"),
            vec![Statement::DefaultIfZero {
                field: "c.Greeting".to_string(),
                zero: "\"\"".to_string(),
                value: "\"hello\"".to_string(),
            }]
        );

        let n = field("Amount", GoType::named("uint8"), "default=1");
        assert_eq!(
            compile_field(&n, "c"),
            vec![Statement::DefaultIfZero {
                field: "c.Amount".to_string(),
                zero: "0".to_string(),
                value: "1".to_string(),
            }]
        );
    }

    #[test]
    fn test_default_string_value_is_escaped() {
        let s = field("S", GoType::named("string"), "default=say \"hi\"");
        match compile_field(&s, "c").as_slice() {
            [Statement::DefaultIfZero { value, .. }] => assert_eq!(value, r#""say \"hi\"""#),
            other => panic!("unexpected statements: {:?}", other),
        }
    }

    #[test]
    fn test_default_on_named_type_uses_constructed_zero() {
        let f = field("When", GoType::qualified("time", "Time"), "default=time.Now()");
        assert_eq!(
            compile_field(&f, "e"),
            vec![Statement::DefaultIfZero {
                field: "e.When".to_string(),
                zero: "*new(time.Time)".to_string(),
                value: "time.Now()".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_constraints_are_ignored() {
        let f = field("Name", GoType::named("string"), "email,required,uuid=4");
        assert_eq!(compile_field(&f, "p").len(), 1);
    }

    #[test]
    fn test_constraint_order_is_tag_order() {
        let f = field("Amount", GoType::named("int"), "default=1,max=9,required");
        let statements = compile_field(&f, "p");
        assert!(matches!(statements[0], Statement::DefaultIfZero { .. }));
        assert!(matches!(statements[1], Statement::Guard { op: CmpOp::Gt, .. }));
        assert!(matches!(statements[2], Statement::Guard { op: CmpOp::Eq, .. }));
    }

    #[test]
    fn test_min_and_gt_differ_only_at_boundary() {
        use std::cmp::Ordering;

        let f = field("N", GoType::named("int"), "min=5,gt=5");
        let statements = compile_field(&f, "p");
        let ops: Vec<CmpOp> = statements
            .iter()
            .map(|s| match s {
                Statement::Guard { op, .. } => *op,
                other => panic!("expected guard, got {:?}", other),
            })
            .collect();

        // value == 5
        assert!(!ops[0].violated_by(Ordering::Equal));
        assert!(ops[1].violated_by(Ordering::Equal));
        // value < 5
        assert!(ops[0].violated_by(Ordering::Less));
        assert!(ops[1].violated_by(Ordering::Less));
        // value > 5
        assert!(!ops[0].violated_by(Ordering::Greater));
        assert!(!ops[1].violated_by(Ordering::Greater));
    }
}
