//! Property tests for the declaration source and the generated output.

use std::path::Path;

use proptest::prelude::*;

use validgen::{format, generate, parse_source, RenderConfig};

fn ident() -> impl Strategy<Value = String> {
    // Exported names can never collide with Go keywords
    proptest::string::string_regex("[A-Z][a-zA-Z0-9]{0,7}").unwrap()
}

fn field_type() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec![
        "int", "uint16", "float64", "string", "bool", "[]string", "[4]int", "map[string]int",
        "*int", "func() error", "interface{}", "chan int", "time.Time", "Custom",
    ])
}

fn tag() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec![
        "", "required", "zero", "min=1", "max=9,min=2", "gt=0,lt=10", "len=2", "lenmin=1,lenmax=3",
        "default=3", "required,default=1", "email",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_parse_source_never_panics(src in ".{0,200}") {
        let _ = parse_source(&src, Path::new("fuzz.go"), "arg");
    }

    /// PROPERTY: Well-formed structs round-trip their field names and tags,
    /// and the generated file always passes the output checker.
    #[test]
    fn property_generated_output_is_well_formed(
        name in ident(),
        fields in proptest::collection::vec((ident(), field_type(), tag()), 0..=6),
    ) {
        let mut src = format!("package p\n\ntype {} struct {{\n", name);
        for (i, (field, ty, tag)) in fields.iter().enumerate() {
            src.push_str(&format!("\t{}{} {} `arg:\"{}\"`\n", field, i, ty, tag));
        }
        src.push_str("}\n");

        let pkg = parse_source(&src, Path::new("p.go"), "arg").unwrap();
        let entity = pkg.entity(&name).unwrap();
        prop_assert_eq!(entity.fields.len(), fields.len());
        for (decl, (_, _, tag)) in entity.fields.iter().zip(&fields) {
            prop_assert_eq!(decl.tag.as_str(), *tag);
        }

        let out = generate(&pkg, &[name.clone()], &RenderConfig::default()).unwrap();
        prop_assert!(format::check(&out).is_ok());
        prop_assert_eq!(format::normalize(&out), out);
    }
}
