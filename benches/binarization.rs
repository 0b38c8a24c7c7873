use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_ean::tools::render_row;
use rust_ean::utils::binarization::{calculate_otsu_threshold, otsu_binarize, threshold_binarize};
use rust_ean::utils::grayscale::{PixelFormat, to_luminosity};
use rust_ean::utils::memory_pool::BufferPool;
use rust_ean::{Preprocessor, encode};

fn symbol_gray(unit: usize) -> Vec<u8> {
    let bits = encode("590123412345").unwrap();
    to_luminosity(&render_row(&bits, unit, 10, PixelFormat::Rgb), PixelFormat::Rgb)
}

fn bench_otsu_threshold(c: &mut Criterion) {
    let gray = symbol_gray(4);
    c.bench_function("otsu_threshold_460", |b| {
        b.iter(|| calculate_otsu_threshold(black_box(&gray)))
    });
}

fn bench_otsu_binarize_small(c: &mut Criterion) {
    let gray = symbol_gray(4);
    c.bench_function("otsu_binarize_460", |b| {
        b.iter(|| otsu_binarize(black_box(&gray)))
    });
}

fn bench_otsu_binarize_large(c: &mut Criterion) {
    let gray = symbol_gray(16);
    c.bench_function("otsu_binarize_1840", |b| {
        b.iter(|| otsu_binarize(black_box(&gray)))
    });
}

fn bench_threshold_binarize(c: &mut Criterion) {
    let gray = symbol_gray(16);
    c.bench_function("threshold_binarize_1840", |b| {
        b.iter(|| threshold_binarize(black_box(&gray), black_box(128.0)))
    });
}

fn bench_luminosity(c: &mut Criterion) {
    let bits = encode("590123412345").unwrap();
    let rgb = render_row(&bits, 16, 10, PixelFormat::Rgb);
    let rgba = render_row(&bits, 16, 10, PixelFormat::Rgba);
    c.bench_function("luminosity_rgb_1840", |b| {
        b.iter(|| to_luminosity(black_box(&rgb), PixelFormat::Rgb))
    });
    c.bench_function("luminosity_rgba_1840", |b| {
        b.iter(|| to_luminosity(black_box(&rgba), PixelFormat::Rgba))
    });
}

fn bench_preprocess_pooled(c: &mut Criterion) {
    let bits = encode("590123412345").unwrap();
    let row = render_row(&bits, 16, 10, PixelFormat::Rgb);
    let preprocessor = Preprocessor::new();
    let mut pool = BufferPool::new();

    c.bench_function("preprocess_1840_fresh", |b| {
        b.iter(|| preprocessor.process(black_box(&row), PixelFormat::Rgb))
    });
    c.bench_function("preprocess_1840_pooled", |b| {
        b.iter(|| {
            let (threshold, _) = preprocessor.process_into(black_box(&row), PixelFormat::Rgb, &mut pool);
            threshold
        })
    });
}

criterion_group!(
    benches,
    bench_otsu_threshold,
    bench_otsu_binarize_small,
    bench_otsu_binarize_large,
    bench_threshold_binarize,
    bench_luminosity,
    bench_preprocess_pooled
);
criterion_main!(benches);
