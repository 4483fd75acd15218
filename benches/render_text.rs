// Run with: cargo bench --bench render_text

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use embedded_graphics::prelude::Point;
use ht16d35_matrix::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use ht16d35_matrix::prelude::*;
use std::hint::black_box;

const TEST_STRINGS: &[(&str, &str)] = &[
    ("short", "HI"),
    ("medium", "HELLO WORLD"),
    ("long", "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"),
];

fn render_text_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_text");

    for (case, text) in TEST_STRINGS {
        group.throughput(Throughput::Elements(
            (text.len() * GLYPH_WIDTH * GLYPH_HEIGHT) as u64,
        ));
        group.bench_with_input(BenchmarkId::new("render_char", case), text, |b, text| {
            let mut buffer = PixelBuffer::new();
            b.iter(|| {
                // one glyph at a time, the way a scrolling display shows text
                for ch in text.chars() {
                    font::render_char(
                        black_box(&mut buffer),
                        black_box(ch),
                        black_box(Point::new(1, 0)),
                        Pixel::GREEN,
                    );
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, render_text_benchmark);
criterion_main!(benches);
