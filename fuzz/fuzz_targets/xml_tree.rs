#![no_main]
use libfuzzer_sys::fuzz_target;
use sitelist::{Config, XmlParser};

fuzz_target!(|data: &[u8]| {
    let _ = XmlParser::with_config(data, Config::default()).parse();
});
