#![no_main]

use bbmark::ConvertOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Malformed XML is an error, not a panic
        if let Ok(result) = bbmark::xml::parse(s) {
            let markdown = bbmark::markdown::convert_plain(&result.value, &ConvertOptions::default());
            assert!(!markdown.ends_with(char::is_whitespace));
        }
    }
});
