use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gs_ascii::cache::{build_cache, build_cache_parallel};
use gs_ascii::luminance::AsciiConverter;
use gs_core::charset::CharacterRamp;
use gs_core::diagnostics::MemoryDiagnostics;
use gs_core::frame::RasterFrame;

fn noise_frame(width: u32, height: u32, seed: u32) -> RasterFrame {
    let mut state = seed;
    let data = (0..width * height * 4)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect();
    RasterFrame::from_rgba(width, height, data).unwrap_or_else(|_| RasterFrame::new(width, height))
}

fn bench_convert(c: &mut Criterion) {
    let ramp = CharacterRamp::default();
    let diag = MemoryDiagnostics::default();
    let frame = noise_frame(480, 270, 7);
    let mut converter = AsciiConverter::new(&ramp);

    c.bench_function("convert_480x270_to_120x35", |b| {
        b.iter(|| converter.convert(black_box(&frame), 120, 35, &diag));
    });
}

fn bench_build_cache(c: &mut Criterion) {
    let ramp = CharacterRamp::default();
    let diag = MemoryDiagnostics::default();
    let frames: Vec<RasterFrame> = (0..24).map(|i| noise_frame(320, 240, i)).collect();

    c.bench_function("build_cache_24_frames", |b| {
        b.iter(|| build_cache(frames.iter().cloned().map(Ok), &ramp, 100, 30, &diag));
    });
    c.bench_function("build_cache_parallel_24_frames", |b| {
        b.iter(|| {
            build_cache_parallel(
                frames.iter().cloned().map(Ok).collect(),
                &ramp,
                100,
                30,
                &diag,
            )
        });
    });
}

criterion_group!(benches, bench_convert, bench_build_cache);
criterion_main!(benches);
