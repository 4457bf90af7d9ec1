#![no_main]
use libfuzzer_sys::fuzz_target;
use texlog::{LogParser, ParseOptions};

fuzz_target!(|data: &[u8]| {
    // Lossy conversion keeps inputs that are "almost" text in play.
    let s = String::from_utf8_lossy(data);

    let result = LogParser::new().parse(&s);
    assert_eq!(
        result.all.len(),
        result.errors.len() + result.warnings.len() + result.typesetting.len()
    );

    let deduped = LogParser::with_options(ParseOptions::default().ignore_duplicates(true)).parse(&s);
    assert!(deduped.len() <= result.len());
});
