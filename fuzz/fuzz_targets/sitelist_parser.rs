#![no_main]
use libfuzzer_sys::fuzz_target;
use sitelist::parse_str;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parsed = parse_str(s);
        assert!(parsed.error.is_none() || parsed.rules.is_empty());
    }
});
