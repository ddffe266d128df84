//! Benchmarks des conversions USNG

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use usng::{Converter, Precision};

fn sample_points() -> Vec<(f64, f64)> {
    (0..1000)
        .map(|i| {
            let t = f64::from(i);
            (-79.0 + (t * 0.163) % 162.0, -179.0 + (t * 0.359) % 358.0)
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let converter = Converter::default();
    let points = sample_points();

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(points.len() as u64));

    for level in [1u8, 4, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| {
                for &(lat, lon) in &points {
                    black_box(converter.encode(black_box(lat), black_box(lon), level).ok());
                }
            })
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let converter = Converter::default();
    let references: Vec<String> = sample_points()
        .into_iter()
        .filter_map(|(lat, lon)| converter.encode(lat, lon, 6).ok())
        .collect();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(references.len() as u64));

    group.bench_function("point", |b| {
        b.iter(|| {
            for r in &references {
                black_box(converter.decode(black_box(r), true));
            }
        })
    });

    group.bench_function("cell", |b| {
        b.iter(|| {
            for r in &references {
                black_box(converter.decode(black_box(r), false));
            }
        })
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_strict", |b| {
        b.iter(|| black_box("18S UJ 23394 07396").parse::<usng::GridReference>())
    });
    c.bench_function("truncate", |b| {
        let converter = Converter::default();
        let reference = converter
            .encode_reference(38.8977, -77.0365, Precision::OneMeter)
            .ok();
        b.iter(|| reference.map(|r| black_box(r).truncate(Precision::OneKilometer)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_parse);
criterion_main!(benches);
