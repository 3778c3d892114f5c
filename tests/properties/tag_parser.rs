//! Property tests for tag parsing.

use proptest::prelude::*;

use validgen::{parse_tag, ConstraintKind};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}(=[A-Za-z0-9 .=\"-]{0,10})?").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_parse_tag_never_panics(tag in ".{0,80}") {
        let _ = parse_tag(&tag);
    }

    /// PROPERTY: One constraint per non-empty segment, in order, split at the first '='.
    #[test]
    fn property_parse_tag_one_constraint_per_segment(
        segments in proptest::collection::vec(segment(), 0..=6),
        empties in 0usize..3,
    ) {
        let mut tag = segments.join(",");
        for _ in 0..empties {
            tag.push(',');
        }

        let constraints = parse_tag(&tag);
        prop_assert_eq!(constraints.len(), segments.len());
        for (constraint, segment) in constraints.iter().zip(&segments) {
            let (name, value) = segment.split_once('=').unwrap_or((segment.as_str(), ""));
            prop_assert_eq!(&constraint.name, name);
            prop_assert_eq!(&constraint.value, value);
        }
    }

    /// PROPERTY: Names outside the vocabulary are kept but classified unknown.
    #[test]
    fn property_unknown_names_are_kept(name in "x[a-z]{2,8}") {
        let constraints = parse_tag(&format!("{},required", name));
        prop_assert_eq!(constraints.len(), 2);
        prop_assert_eq!(constraints[0].kind(), ConstraintKind::Unknown);
        prop_assert_eq!(constraints[1].kind(), ConstraintKind::Required);
    }
}
