use approx::assert_relative_eq;
use ohlcv_chart::core::{Bar, SurfaceSize};
use ohlcv_chart::interaction::{InputEvent, InteractionMode, TouchPoint, TouchPoints};
use ohlcv_chart::render::{RecordingSurface, RenderPass};
use ohlcv_chart::{ChartEngine, ChartEngineConfig, ChartError};

fn bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let open = 50.0 + (i % 17) as f64;
            Bar::new(i as i64 * 60, open, open + 2.0, open - 2.0, open + 0.5, 10 + i as u64)
                .expect("valid bar")
        })
        .collect()
}

fn engine(width: u32, height: u32) -> ChartEngine<RecordingSurface> {
    let config = ChartEngineConfig::new(SurfaceSize::new(width, height));
    ChartEngine::new(RecordingSurface::new(), config).expect("engine init")
}

/// Runs frames until the scheduler goes quiet; returns how many ran.
fn run_frames(engine: &mut ChartEngine<RecordingSurface>) -> usize {
    let mut frames = 0;
    while let Some(token) = engine.pending_frame() {
        engine
            .on_frame(token, frames as f64 * 16.0)
            .expect("frame renders");
        frames += 1;
        assert!(frames < 2_000, "frames never settled");
    }
    frames
}

#[test]
fn zero_sized_surface_is_rejected() {
    let config = ChartEngineConfig::new(SurfaceSize::new(0, 400));
    let err = ChartEngine::new(RecordingSurface::new(), config)
        .err()
        .expect("zero width must fail");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 400
        }
    ));
}

#[test]
fn short_load_then_zoom_at_left_edge() {
    // 2000px plot fits exactly 200 bars at the default 8px + 2px step.
    let mut engine = engine(2_072, 600);
    assert_eq!(engine.viewport().visible_count(), 200);

    engine.set_bars(bars(3)).expect("set bars");
    assert_eq!(engine.viewport().offset_index(), 0.0);

    let before = engine.viewport().index_at_pixel(0.0);
    assert!(engine.zoom_at(0.0, 1.02));
    assert_relative_eq!(engine.viewport().bar_width(), 8.16, max_relative = 1e-12);
    assert_relative_eq!(engine.viewport().index_at_pixel(0.0), before);

    assert_eq!(run_frames(&mut engine), 1);
    let report = engine.last_render_report().expect("frame rendered");
    assert_eq!(report.candles_drawn, 3);
}

#[test]
fn mutations_coalesce_into_one_frame() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(500)).expect("set bars");
    engine.pan_by(30.0);
    engine.zoom_at(100.0, 1.5);

    let token = engine.pending_frame().expect("frame armed");
    assert!(engine.on_frame(token, 0.0).expect("render").is_some());
    assert!(engine.on_frame(token, 16.0).expect("stale").is_none());
    assert_eq!(engine.pending_frame(), None);

    let stats = engine.scheduler_stats();
    assert_eq!(stats.rendered, 1);
    assert!(stats.coalesced >= 2);
}

#[test]
fn drag_release_coasts_with_momentum() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(1_000)).expect("set bars");
    run_frames(&mut engine);
    let start = engine.viewport().offset_index();

    engine
        .handle_event(InputEvent::PointerDown { x: 300.0, y: 200.0, time_ms: 0.0 })
        .expect("down");
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);

    let response = engine
        .handle_event(InputEvent::PointerMove { x: 340.0, y: 200.0, time_ms: 20.0 })
        .expect("move");
    assert!(response.redraw_requested);
    assert!(response.frame_armed);
    assert_relative_eq!(engine.viewport().offset_index(), start - 4.0);

    let response = engine
        .handle_event(InputEvent::PointerUp { x: 340.0, y: 200.0, time_ms: 24.0 })
        .expect("up");
    assert!(response.redraw_requested);
    assert_eq!(engine.interaction_mode(), InteractionMode::Momentum);

    let frames = run_frames(&mut engine);
    assert!(frames > 100);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert!(engine.viewport().offset_index() < start - 4.0);
    assert!(engine.viewport().offset_index() >= 0.0);
}

#[test]
fn throttled_moves_do_not_pan() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(1_000)).expect("set bars");
    let start = engine.viewport().offset_index();

    engine
        .handle_event(InputEvent::PointerDown { x: 0.0, y: 0.0, time_ms: 100.0 })
        .expect("down");
    let response = engine
        .handle_event(InputEvent::PointerMove { x: 50.0, y: 0.0, time_ms: 105.0 })
        .expect("move");
    assert!(!response.redraw_requested);
    assert_eq!(engine.viewport().offset_index(), start);
}

#[test]
fn wheel_zooms_around_cursor_and_suppresses_scroll() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(1_000)).expect("set bars");
    let before = engine.viewport().index_at_pixel(300.0);

    let response = engine
        .handle_event(InputEvent::Wheel { x: 300.0, y: 100.0, delta_y: -1.0 })
        .expect("wheel");
    assert!(response.prevent_default);
    assert!(response.redraw_requested);
    assert_relative_eq!(engine.viewport().bar_width(), 8.16, max_relative = 1e-12);
    assert_relative_eq!(
        engine.viewport().index_at_pixel(300.0),
        before,
        epsilon = 1e-9
    );

    let response = engine
        .handle_event(InputEvent::Wheel { x: 300.0, y: 100.0, delta_y: 0.0 })
        .expect("wheel");
    assert!(response.prevent_default);
    assert!(!response.redraw_requested);
}

#[test]
fn double_click_restores_default_view() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(1_000)).expect("set bars");
    engine.zoom_at(200.0, 3.0);
    engine.pan_by(500.0);

    engine
        .handle_event(InputEvent::PointerDown { x: 0.0, y: 0.0, time_ms: 0.0 })
        .expect("down");
    engine
        .handle_event(InputEvent::PointerMove { x: 80.0, y: 0.0, time_ms: 16.0 })
        .expect("move");
    engine
        .handle_event(InputEvent::PointerUp { x: 80.0, y: 0.0, time_ms: 16.0 })
        .expect("up");
    assert_eq!(engine.interaction_mode(), InteractionMode::Momentum);

    let response = engine
        .handle_event(InputEvent::DoubleClick { x: 10.0, y: 10.0 })
        .expect("double click");
    assert!(response.redraw_requested);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(engine.viewport().bar_width(), 8.0);
    assert_eq!(
        engine.viewport().offset_index(),
        engine.viewport().latest_offset()
    );
}

#[test]
fn single_touch_pans_and_multi_touch_is_ignored() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(1_000)).expect("set bars");
    let start = engine.viewport().offset_index();

    let response = engine
        .handle_event(InputEvent::touch_start(100.0, 100.0, 0.0))
        .expect("touch start");
    assert!(response.prevent_default);
    engine
        .handle_event(InputEvent::touch_move(120.0, 100.0, 32.0))
        .expect("touch move");
    assert_relative_eq!(engine.viewport().offset_index(), start - 2.0);
    engine
        .handle_event(InputEvent::touch_end(40.0))
        .expect("touch end");
    assert_ne!(engine.interaction_mode(), InteractionMode::Dragging);

    let mut touches = TouchPoints::new();
    touches.push(TouchPoint { x: 10.0, y: 10.0 });
    touches.push(TouchPoint { x: 60.0, y: 10.0 });
    engine
        .handle_event(InputEvent::TouchStart { touches: touches.clone(), time_ms: 100.0 })
        .expect("pinch start");
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);

    let before = engine.viewport().offset_index();
    engine
        .handle_event(InputEvent::TouchMove { touches, time_ms: 200.0 })
        .expect("pinch move");
    assert_eq!(engine.viewport().offset_index(), before);
}

#[test]
fn resize_refits_visible_count() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(1_000)).expect("set bars");
    run_frames(&mut engine);

    let response = engine
        .handle_event(InputEvent::Resize(SurfaceSize::new(400, 300)))
        .expect("resize");
    assert!(response.frame_armed);
    assert_eq!(engine.size(), SurfaceSize::new(400, 300));
    assert_eq!(engine.viewport().visible_count(), 33);

    let response = engine
        .handle_event(InputEvent::Resize(SurfaceSize::new(0, 0)))
        .expect("empty resize");
    assert!(!response.redraw_requested);
    assert_eq!(engine.size(), SurfaceSize::new(400, 300));
}

#[test]
fn toggling_volume_changes_render_passes() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(40)).expect("set bars");
    engine.set_show_volume(false);
    run_frames(&mut engine);

    let report = engine.last_render_report().expect("frame rendered");
    assert!(!report.passes.contains(&RenderPass::Volume));
    assert!(!report.passes.contains(&RenderPass::VolumeScale));
}

#[test]
fn loading_overlay_keeps_frames_coming() {
    let mut engine = engine(800, 600);
    engine.begin_load("Loading EURUSD");

    let token = engine.pending_frame().expect("frame armed");
    let report = engine
        .on_frame(token, 0.0)
        .expect("render")
        .expect("live token");
    assert!(report.overlay_only);
    assert!(engine.pending_frame().is_some());
    assert!(engine.surface().texts().contains(&"Loading EURUSD"));
}

#[test]
fn reload_during_fling_lands_on_latest_bars() {
    let mut engine = engine(800, 600);
    engine.set_bars(bars(500)).expect("initial bars");
    run_frames(&mut engine);

    engine
        .handle_event(InputEvent::PointerDown { x: 300.0, y: 200.0, time_ms: 0.0 })
        .expect("down");
    engine
        .handle_event(InputEvent::PointerMove { x: 400.0, y: 200.0, time_ms: 16.0 })
        .expect("move");
    engine
        .handle_event(InputEvent::PointerUp { x: 400.0, y: 200.0, time_ms: 16.0 })
        .expect("up");
    assert_eq!(engine.interaction_mode(), InteractionMode::Momentum);

    engine.set_bars(bars(2_000)).expect("reload");
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    run_frames(&mut engine);

    let viewport = engine.viewport();
    assert_relative_eq!(viewport.offset_index(), viewport.latest_offset());
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}
