#![no_main]

use std::io::{BufReader, Cursor};

use libfuzzer_sys::fuzz_target;
use strainer::{CancellationToken, ChunkReader, ChunkSize};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let chunk_size = (data[0] as usize % 32) + 1;
    let reader = ChunkReader::new(
        BufReader::new(Cursor::new(&data[1..])),
        ChunkSize::new(chunk_size).expect("non-zero chunk size"),
        CancellationToken::new(),
    );

    let mut chunks = 0usize;
    for chunk in reader {
        // Undecodable bytes become U+FFFD, so an in-memory source never fails
        let lines = chunk.expect("in-memory reads do not fail");
        assert!(!lines.is_empty() && lines.len() <= chunk_size);
        chunks += 1;
    }
    assert!(chunks <= data.len());
});
