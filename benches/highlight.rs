use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use mosquito_lens_rs::image_pipeline::{
    HighlightConfig, HighlightPipeline, RawFrame, WindowSum,
    analysis::{build_integral, extract_luminance},
    render::normalize_orientation,
    FrameDecoder, Yuv420Decoder,
};

fn generate_mock_frame(width: usize, height: usize, rotation: i32) -> RawFrame {
    let mut luma = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = if (x / 7 + y / 5) % 11 == 0 { 20 } else { 180 + ((x + y) % 50) as u8 };
            luma.push(value);
        }
    }
    RawFrame::from_luma(width, height, luma, rotation)
}

fn benchmark_pipeline_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_by_size");

    let sizes = vec![
        (320, 240, "320x240"),
        (640, 480, "640x480"),
        (1280, 720, "1280x720"),
    ];

    for (width, height, label) in sizes {
        let frame = generate_mock_frame(width, height, 90);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &frame,
            |b, frame| {
                let pipeline = HighlightPipeline::new(HighlightConfig::default()).unwrap();

                b.iter(|| {
                    let _ = pipeline.process(black_box(frame.clone()));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_window_sum_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_sum_modes");
    let frame = generate_mock_frame(640, 480, 0);

    let modes = vec![
        (WindowSum::ClampedCorners, "clamped_corners"),
        (WindowSum::Inclusive, "inclusive"),
    ];

    for (mode, label) in modes {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &frame,
            |b, frame| {
                let config = HighlightConfig::builder().window_sum(mode).build();
                let pipeline = HighlightPipeline::new(config).unwrap();

                b.iter(|| {
                    let _ = pipeline.process(black_box(frame.clone()));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let frame = generate_mock_frame(640, 480, 0);
    let raster = Yuv420Decoder.decode(&frame).unwrap();
    let luminance = extract_luminance(&raster);

    group.bench_function("decode_frame", |b| {
        b.iter(|| Yuv420Decoder.decode(black_box(&frame)));
    });

    group.bench_function("build_integral", |b| {
        b.iter(|| build_integral(black_box(&luminance)));
    });

    group.bench_function("rotate_90", |b| {
        b.iter(|| normalize_orientation(black_box(raster.clone()), 90.0));
    });

    group.bench_function("rotate_30", |b| {
        b.iter(|| normalize_orientation(black_box(raster.clone()), 30.0));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pipeline_sizes,
    benchmark_window_sum_modes,
    benchmark_stages
);
criterion_main!(benches);
