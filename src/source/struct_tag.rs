//! Struct tag lookup with Go's `reflect.StructTag` rules
//!
//! A tag is a space-separated list of `key:"quoted value"` pairs. Scanning
//! stops at the first malformed pair, exactly as `StructTag.Lookup` does.

use super::lexer::unquote;

/// Value for `key` in a decoded struct tag, if present
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    let mut rest = tag.as_bytes();
    while !rest.is_empty() {
        let skip = rest.iter().take_while(|&&b| b == b' ').count();
        rest = &rest[skip..];
        if rest.is_empty() {
            break;
        }

        let name_len = rest
            .iter()
            .take_while(|&&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
            .count();
        if name_len == 0
            || name_len + 1 >= rest.len()
            || rest[name_len] != b':'
            || rest[name_len + 1] != b'"'
        {
            break;
        }
        let name = &rest[..name_len];
        rest = &rest[name_len + 1..];

        let mut i = 1;
        while i < rest.len() && rest[i] != b'"' {
            if rest[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= rest.len() {
            break;
        }
        let quoted = &rest[..=i];
        rest = &rest[i + 1..];

        if name == key.as_bytes() {
            return std::str::from_utf8(quoted).ok().and_then(unquote);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_single_key() {
        assert_eq!(lookup(r#"arg:"required""#, "arg").as_deref(), Some("required"));
    }

    #[test]
    fn test_lookup_among_other_keys() {
        let tag = r#"json:"amount,omitempty" arg:"min=1,max=100""#;
        assert_eq!(lookup(tag, "arg").as_deref(), Some("min=1,max=100"));
        assert_eq!(lookup(tag, "json").as_deref(), Some("amount,omitempty"));
    }

    #[test]
    fn test_lookup_missing_key() {
        assert_eq!(lookup(r#"json:"name""#, "arg"), None);
        assert_eq!(lookup("", "arg"), None);
    }

    #[test]
    fn test_lookup_escaped_quotes_in_value() {
        let tag = r#"arg:"default=\"x\"""#;
        assert_eq!(lookup(tag, "arg").as_deref(), Some(r#"default="x""#));
    }

    #[test]
    fn test_lookup_stops_at_malformed_pair() {
        // A space after the colon is not a valid pair; later keys are not reached.
        let tag = r#"json: "name" arg:"required""#;
        assert_eq!(lookup(tag, "arg"), None);
    }

    #[test]
    fn test_lookup_key_is_exact() {
        assert_eq!(lookup(r#"args:"required""#, "arg"), None);
    }
}
