//! Пропускная способность кодека на полных кадрах (1034 слова).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use vrl_core::{decode_frame, encode_frame, SAMPLES_PER_FRAME};
use vrl_types::{ClassId, FrameHeader};

fn bench_header() -> FrameHeader {
    let mut h = FrameHeader::new(0x4E44_5230);
    h.time_seconds = 1_704_067_200;
    h.class_id = Some(ClassId {
        oui: 0x0012_A2FF,
        information_class: 0x0053,
        packet_class: 0x0001,
    });
    h
}

fn bench_encode(c: &mut Criterion) {
    let header = bench_header();
    let samples: Vec<i16> = (0..2 * SAMPLES_PER_FRAME as i32)
        .map(|i| (i % 32_768) as i16)
        .collect();
    let frame_bytes = encode_frame(&header, &samples).unwrap().len() as u64;

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(frame_bytes));
    group.bench_function("encode_frame", |b| {
        b.iter(|| encode_frame(black_box(&header), black_box(&samples)).unwrap())
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let header = bench_header();
    let samples: Vec<i16> = (0..2 * SAMPLES_PER_FRAME as i32)
        .map(|i| (i % 32_768) as i16)
        .collect();
    let wire = encode_frame(&header, &samples).unwrap();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(wire.len() as u64));
    group.bench_function("decode_frame", |b| {
        b.iter(|| decode_frame(black_box(&wire)).unwrap())
    });
    group.bench_function("decode_frame_with_samples", |b| {
        b.iter(|| decode_frame(black_box(&wire)).unwrap().samples())
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
