#![no_main]

use bbmark::ConvertOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // The reader never rejects input; every string is a post.
        if let Ok(result) = bbmark::bbcode::parse(s) {
            for options in [
                ConvertOptions::default(),
                ConvertOptions::default()
                    .with_inline_code(true)
                    .with_traditional_linebreaks(true),
            ] {
                let markdown = bbmark::markdown::convert_plain(&result.value, &options);

                // Trailing whitespace and breaks are always trimmed
                assert!(
                    !markdown.ends_with(char::is_whitespace),
                    "output ends with whitespace: {markdown:?}"
                );
            }
        }
    }
});
