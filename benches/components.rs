//! Component-level microbenchmarks for huffpack.
//! Covers frequency counting, tree building, bit encoding and decoding,
//! and full container round trips.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffpack::codec;
use huffpack::{
    compress, compress_to_container, decompress, CodeTable, FrequencyTable, HuffmanTree,
    PackOptions,
};

fn make_pattern(len: usize) -> String {
    let pattern = "The quick brown fox jumps over the lazy dog.\n";
    pattern.chars().cycle().take(len).collect()
}

fn make_random(len: usize, mut seed: u32) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        // Mostly Latin-1 with some CJK, to exercise multi-byte symbols.
        let c = if seed >> 28 == 0 {
            char::from_u32(0x4E00 + (seed >> 16 & 0x3FF)).unwrap_or('?')
        } else {
            char::from((seed >> 16) as u8)
        };
        out.push(c);
    }
    out
}

fn inputs() -> Vec<(&'static str, String)> {
    vec![
        ("pattern", make_pattern(1 << 20)),
        ("random", make_random(1 << 20, 0x1234_5678)),
    ]
}

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");

    for (name, text) in inputs() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("frequencies", name), &text, |b, text| {
            b.iter(|| black_box(FrequencyTable::from_text(black_box(text))));
        });

        let frequencies = FrequencyTable::from_text(&text);
        group.bench_with_input(
            BenchmarkId::new("tree_and_codes", name),
            &frequencies,
            |b, frequencies| {
                b.iter(|| {
                    let tree = HuffmanTree::from_frequencies(black_box(frequencies)).unwrap();
                    black_box(CodeTable::from_tree(&tree).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for (name, text) in inputs() {
        let compressed = compress(&text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", name), &text, |b, text| {
            b.iter(|| black_box(codec::encode(black_box(text), &compressed.codes).unwrap()));
        });

        group.bench_with_input(
            BenchmarkId::new("decode", name),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    black_box(
                        codec::decode(black_box(&compressed.bits), compressed.tree.as_ref())
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_container(c: &mut Criterion) {
    let text = make_pattern(1 << 18);
    let mut group = c.benchmark_group("container_256k");
    group.throughput(Throughput::Bytes(text.len() as u64));

    for (label, options) in [
        ("with_digest", PackOptions::default()),
        ("minimal", PackOptions::minimal()),
    ] {
        group.bench_function(BenchmarkId::new("pack", label), |b| {
            b.iter(|| black_box(compress_to_container(black_box(&text), "bench.txt", &options)));
        });
    }

    let packed = compress_to_container(&text, "bench.txt", &PackOptions::default()).unwrap();
    group.bench_function("unpack", |b| {
        b.iter(|| black_box(decompress(black_box(&packed)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_model, bench_codec, bench_container);
criterion_main!(benches);
