//! Property tests for classification and constraint compilation.

use std::cmp::Ordering;

use proptest::prelude::*;

use validgen::compiler::compile_field;
use validgen::render::Statement;
use validgen::types::ChanDir;
use validgen::{FieldDecl, GoType, TypeCategory};

const NAMES: &[&str] = &[
    "int", "uint8", "float64", "complex128", "bool", "string", "any", "error", "integer",
    "Point", "T",
];

fn go_type() -> impl Strategy<Value = GoType> {
    let leaf = prop_oneof![
        proptest::sample::select(NAMES).prop_map(GoType::named),
        Just(GoType::qualified("time", "Duration")),
        Just(GoType::Interface { methods: Vec::new() }),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(GoType::pointer),
            inner.clone().prop_map(GoType::slice),
            (1u8..9, inner.clone()).prop_map(|(n, t)| GoType::array(n.to_string(), t)),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| GoType::map(k, v)),
            inner.prop_map(|t| GoType::chan(ChanDir::Both, t)),
        ]
    })
}

fn guard_ops(statements: &[Statement]) -> Vec<validgen::render::CmpOp> {
    statements
        .iter()
        .filter_map(|s| match s {
            Statement::Guard { op, .. } => Some(*op),
            _ => None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every type has a non-empty zero value.
    #[test]
    fn property_zero_value_never_empty(ty in go_type()) {
        prop_assert!(!ty.zero_value().is_empty());
    }

    /// PROPERTY: Nilable types have the zero value `nil`, and only they do.
    #[test]
    fn property_nil_zero_matches_category(ty in go_type()) {
        let nilable = !matches!(ty, GoType::Array { .. })
            && matches!(
                ty.category(),
                TypeCategory::Slice
                    | TypeCategory::Map
                    | TypeCategory::Channel
                    | TypeCategory::Function
                    | TypeCategory::Interface
                    | TypeCategory::Pointer
            );
        prop_assert_eq!(ty.zero_value() == "nil", nilable);
    }

    /// PROPERTY: `required` always yields exactly one guard, whatever the type.
    #[test]
    fn property_required_always_guards(ty in go_type()) {
        let field = FieldDecl::new("X", ty, "required");
        prop_assert_eq!(guard_ops(&compile_field(&field, "v")).len(), 1);
    }

    /// PROPERTY: `min=N` admits exactly x >= N and `gt=N` exactly x > N.
    #[test]
    fn property_min_gt_boundaries(x in -50i64..50, n in -50i64..50) {
        let field = FieldDecl::new("X", GoType::named("int64"), format!("min={},gt={}", n, n));
        let ops = guard_ops(&compile_field(&field, "v"));
        prop_assert_eq!(ops.len(), 2);

        let ordering = x.cmp(&n);
        prop_assert_eq!(ops[0].violated_by(ordering), x < n);
        prop_assert_eq!(ops[1].violated_by(ordering), x <= n);
        prop_assert_eq!(
            ops[0].violated_by(ordering) != ops[1].violated_by(ordering),
            ordering == Ordering::Equal
        );
    }

    /// PROPERTY: `max=N` admits exactly x <= N and `lt=N` exactly x < N.
    #[test]
    fn property_max_lt_boundaries(x in -50i64..50, n in -50i64..50) {
        let field = FieldDecl::new("X", GoType::named("float32"), format!("max={},lt={}", n, n));
        let ops = guard_ops(&compile_field(&field, "v"));
        let ordering = x.cmp(&n);
        prop_assert_eq!(ops[0].violated_by(ordering), x > n);
        prop_assert_eq!(ops[1].violated_by(ordering), x >= n);
    }
}
