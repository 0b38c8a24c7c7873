use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_ean::detector::SequenceDetector;
use rust_ean::symbology::ean13::decode;
use rust_ean::tools::render_row;
use rust_ean::{Ean13, PixelFormat, ScanConfig, Scanline, Scanner, Symbology, encode};

fn bench_scan_row(c: &mut Criterion) {
    let bits = encode("590123412345").unwrap();
    let mut group = c.benchmark_group("scan_row");
    for unit in [1usize, 4, 8] {
        let row = render_row(&bits, unit, 10, PixelFormat::Rgb);
        group.bench_with_input(BenchmarkId::from_parameter(unit), &row, |b, row| {
            let mut scanner = Scanner::with_config(ScanConfig::builtin());
            b.iter(|| scanner.scan_row(black_box(row), PixelFormat::Rgb))
        });
    }
    group.finish();
}

fn bench_scan_row_pooled(c: &mut Criterion) {
    let bits = encode("590123412345").unwrap();
    let row = render_row(&bits, 4, 10, PixelFormat::Rgb);
    let mut scanner = Scanner::with_pool();
    c.bench_function("scan_row_pooled_4", |b| {
        b.iter(|| scanner.scan_row(black_box(&row), PixelFormat::Rgb))
    });
}

fn bench_find_guards(c: &mut Criterion) {
    let bits = encode("590123412345").unwrap();
    let padded = [vec![0u8; 10], bits, vec![0u8; 10]].concat();
    let line = Scanline::from_bits_scaled(&padded, 4);
    let pattern = Ean13.begin_pattern();
    c.bench_function("find_guard_sequences_460", |b| {
        b.iter(|| SequenceDetector::find_sequences(black_box(&line), &pattern, 120.0))
    });
}

fn bench_decode_runs(c: &mut Criterion) {
    let bits = encode("590123412345").unwrap();
    let runs = Scanline::from_bits_scaled(&bits, 4).runs();
    c.bench_function("decode_symbol_runs", |b| b.iter(|| decode(black_box(&runs))));
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode_ean13", |b| {
        b.iter(|| encode(black_box("590123412345")))
    });
}

criterion_group!(
    benches,
    bench_scan_row,
    bench_scan_row_pooled,
    bench_find_guards,
    bench_decode_runs,
    bench_encode
);
criterion_main!(benches);
