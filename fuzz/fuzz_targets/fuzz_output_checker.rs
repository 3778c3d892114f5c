#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(src) = std::str::from_utf8(data) {
        // Checking arbitrary text should never panic
        let _ = validgen::format::format_source(src);
    }
});
