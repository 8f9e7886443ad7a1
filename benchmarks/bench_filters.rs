use std::hint::black_box;
use std::io::{self, BufReader, Cursor};

use criterion::{criterion_group, criterion_main, Criterion};

use strainer::{
    CancellationToken, ChunkReader, ChunkSize, Filter, FilterKind, ParallelConfig,
    ParallelProcessor, PipelineBuilder, TextFilter,
};

const SENTENCE: &str = "An apple a day keeps the doctor away, but the rather tall trees stay put.";

fn sample_chunk(lines: usize) -> String {
    vec![SENTENCE; lines].join("\n")
}

fn bench_contains_t(c: &mut Criterion) {
    let chunk = sample_chunk(100);
    c.bench_function("contains_t_100_lines", |b| {
        b.iter(|| black_box(Filter::ContainsT.filter_text(black_box(&chunk))));
    });
}

fn bench_min_length(c: &mut Criterion) {
    let chunk = sample_chunk(100);
    let filter = Filter::MinLength { min_len: 3 };
    c.bench_function("min_length_100_lines", |b| {
        b.iter(|| black_box(filter.filter_text(black_box(&chunk))));
    });
}

fn bench_vowel_middle(c: &mut Criterion) {
    let chunk = sample_chunk(100);
    c.bench_function("vowel_middle_100_lines", |b| {
        b.iter(|| black_box(Filter::VowelMiddle.filter_text(black_box(&chunk))));
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let chunk = sample_chunk(100);
    let pipeline = PipelineBuilder::new()
        .with_filters([
            FilterKind::ContainsT,
            FilterKind::MinLength,
            FilterKind::VowelMiddle,
        ])
        .build();
    c.bench_function("pipeline_all_filters_100_lines", |b| {
        b.iter(|| black_box(pipeline.apply(Some(black_box(chunk.as_str())))));
    });
}

fn bench_processor_workers(c: &mut Criterion) {
    let text: String = (0..20_000).map(|_| format!("{}\n", SENTENCE)).collect();

    for workers in [1, 4] {
        let processor = ParallelProcessor::new(
            ParallelConfig {
                num_workers: workers,
                chunk_size: 100,
                buffer_size: None,
            },
            PipelineBuilder::new()
                .with_filters([FilterKind::ContainsT, FilterKind::MinLength])
                .build(),
        );

        c.bench_function(&format!("processor_20k_lines_{}_workers", workers), |b| {
            b.iter(|| {
                let chunks = ChunkReader::new(
                    BufReader::new(Cursor::new(text.as_bytes())),
                    ChunkSize::default(),
                    CancellationToken::new(),
                );
                let report = processor
                    .process_chunks(
                        chunks,
                        &CancellationToken::new(),
                        &mut io::sink(),
                        &mut io::sink(),
                    )
                    .unwrap();
                black_box(report.stats.bytes_output);
            });
        });
    }
}

criterion_group!(
    filter_benches,
    bench_contains_t,
    bench_min_length,
    bench_vowel_middle,
    bench_full_pipeline,
    bench_processor_workers
);
criterion_main!(filter_benches);
