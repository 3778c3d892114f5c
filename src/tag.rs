//! Tag parser for the constraint mini-language
//!
//! A tag is a comma-separated list of `name` or `name=value` tokens, e.g.
//! `min=1,max=100,default=1`. Names are not checked against the vocabulary
//! here; unknown names survive parsing and compile to nothing.

use crate::models::Constraint;

/// Separator between constraint tokens
const CONSTRAINT_SEPARATOR: char = ',';

/// Separator between a constraint name and its argument
const VALUE_SEPARATOR: char = '=';

/// Split a raw tag into constraints, preserving tag order.
///
/// Empty segments (`"required,,min=1"`) are skipped. Each segment is split
/// once on its first `=`, so `default=a=b` carries the argument `a=b`.
pub fn parse_tag(tag: &str) -> Vec<Constraint> {
    tag.split(CONSTRAINT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
        .collect()
}

fn parse_segment(segment: &str) -> Constraint {
    match segment.split_once(VALUE_SEPARATOR) {
        Some((name, value)) => Constraint::new(name, value),
        None => Constraint::new(segment, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_ordered_pairs() {
        let constraints = parse_tag("min=1,max=100,default=1");

        assert_eq!(
            constraints,
            vec![
                Constraint::new("min", "1"),
                Constraint::new("max", "100"),
                Constraint::new("default", "1"),
            ]
        );
    }

    #[test]
    fn test_parse_tag_bare_name() {
        assert_eq!(parse_tag("required"), vec![Constraint::new("required", "")]);
    }

    #[test]
    fn test_parse_tag_empty() {
        assert!(parse_tag("").is_empty());
    }

    #[test]
    fn test_parse_tag_skips_empty_segments() {
        assert_eq!(
            parse_tag(",required,,min=0,"),
            vec![Constraint::new("required", ""), Constraint::new("min", "0")]
        );
    }

    #[test]
    fn test_parse_tag_splits_on_first_equals() {
        assert_eq!(
            parse_tag("default=a=b"),
            vec![Constraint::new("default", "a=b")]
        );
    }

    #[test]
    fn test_parse_tag_empty_value_after_equals() {
        assert_eq!(parse_tag("min="), vec![Constraint::new("min", "")]);
    }

    #[test]
    fn test_parse_tag_keeps_unknown_names() {
        let constraints = parse_tag("email,required");
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].name, "email");
    }

    #[test]
    fn test_parse_tag_does_not_trim() {
        assert_eq!(
            parse_tag("required, min=1"),
            vec![Constraint::new("required", ""), Constraint::new(" min", "1")]
        );
    }
}
