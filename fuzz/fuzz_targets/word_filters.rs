#![no_main]

use libfuzzer_sys::fuzz_target;
use strainer::{Filter, TextFilter};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let min_len = data[0] as usize % 16;
    if let Ok(input) = std::str::from_utf8(&data[1..]) {
        let filters = [
            Filter::ContainsT,
            Filter::MinLength { min_len },
            Filter::VowelMiddle,
        ];
        for filter in filters {
            let output = filter.filter_text(input);
            assert_eq!(output, output.trim());
        }
    }
});
