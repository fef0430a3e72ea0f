use criterion::{Criterion, criterion_group, criterion_main};
use ohlcv_chart::api::{ChartEngine, ChartEngineConfig};
use ohlcv_chart::core::{Bar, SurfaceSize, Viewport, ViewportConfig, compute_range_stats};
use ohlcv_chart::data::decode_bars;
use ohlcv_chart::render::RecordingSurface;
use std::hint::black_box;

fn generated_bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            Bar::new(i as i64 * 60, open, high, low, close, 100 + (i as u64 % 900))
                .expect("valid generated bar")
        })
        .collect()
}

fn bench_viewport_zoom_pan(c: &mut Criterion) {
    let mut viewport = Viewport::new(ViewportConfig::default()).expect("viewport init");
    viewport.set_total_bars(100_000);
    viewport.set_plot_width(1_848.0);
    viewport.reset_to_latest(8.0);

    c.bench_function("viewport_zoom_pan", |b| {
        b.iter(|| {
            viewport.zoom_at(black_box(640.0), black_box(1.02));
            viewport.pan_by(black_box(37.0));
            viewport.zoom_at(black_box(640.0), black_box(0.98));
            viewport.pan_by(black_box(-37.0));
        })
    });
}

fn bench_range_stats_10k(c: &mut Criterion) {
    let bars = generated_bars(10_000);
    c.bench_function("range_stats_10k", |b| {
        b.iter(|| compute_range_stats(black_box(&bars), black_box(0), black_box(10_000)))
    });
}

fn bench_decode_chunked_5k(c: &mut Criterion) {
    let chunks: Vec<String> = (0..50)
        .map(|chunk| {
            let bars: Vec<String> = (0..100)
                .map(|i| {
                    format!(
                        r#"{{"time":{},"open":1.1,"high":1.2,"low":1.0,"close":1.15,"tickVolume":{}}}"#,
                        i * 60,
                        i + 1
                    )
                })
                .collect();
            format!(r#"{{"chunkStart":{},"bars":[{}]}}"#, chunk * 6_000, bars.join(","))
        })
        .collect();
    let payload = format!("[{}]", chunks.join(","));

    c.bench_function("decode_chunked_5k", |b| {
        b.iter(|| decode_bars(black_box(&payload)).expect("decode"))
    });
}

fn bench_full_frame_2k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(SurfaceSize::new(1_920, 1_080));
    let mut engine = ChartEngine::new(RecordingSurface::new(), config).expect("engine init");
    engine.set_bars(generated_bars(2_000)).expect("set bars");

    c.bench_function("full_frame_2k", |b| {
        b.iter(|| {
            engine.surface_mut().clear();
            let report = engine.render_now(black_box(0.0)).expect("render");
            black_box(report.candles_drawn);
        })
    });
}

criterion_group!(
    benches,
    bench_viewport_zoom_pan,
    bench_range_stats_10k,
    bench_decode_chunked_5k,
    bench_full_frame_2k
);
criterion_main!(benches);
