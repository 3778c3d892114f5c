#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(tag) = std::str::from_utf8(data) {
        // Every non-empty segment becomes exactly one constraint
        let constraints = validgen::parse_tag(tag);
        let segments = tag.split(',').filter(|s| !s.is_empty()).count();
        assert_eq!(constraints.len(), segments);
    }
});
