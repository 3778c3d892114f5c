#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(src) = std::str::from_utf8(data) {
        // Parsing and generating for every struct found should never panic
        let path = std::path::Path::new("fuzz.go");
        if let Ok(pkg) = validgen::parse_source(src, path, "arg") {
            let names: Vec<String> = pkg.entities.iter().map(|e| e.name.clone()).collect();
            let _ = validgen::generate(&pkg, &names, &validgen::RenderConfig::default());
        }
    }
});
