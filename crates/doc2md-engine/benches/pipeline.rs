use criterion::{Criterion, criterion_group, criterion_main};
use doc2md_engine::{Converter, EngineConfig};
mod common;

fn bench_single_chapter(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    let converter = Converter::new(EngineConfig::default()).unwrap();
    let blocks = common::generate_chapter(100);
    group.bench_function("convert_chapter", |b| {
        b.iter(|| {
            let output = converter.convert(std::hint::black_box(&blocks)).unwrap();
            std::hint::black_box(output);
        });
    });

    group.finish();
}

fn bench_document_chapters(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let converter = Converter::new(EngineConfig::default()).unwrap();
    let blocks = common::generate_document(16, 25);
    group.bench_function("convert_document", |b| {
        b.iter(|| {
            let outputs = converter.convert_document(std::hint::black_box(&blocks));
            std::hint::black_box(outputs);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_chapter, bench_document_chapters);
criterion_main!(benches);
