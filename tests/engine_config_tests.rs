use ohlcv_chart::core::SurfaceSize;
use ohlcv_chart::render::RecordingSurface;
use ohlcv_chart::{ChartEngine, ChartEngineConfig, ChartError};

#[test]
fn partial_json_keeps_defaults() {
    let config = ChartEngineConfig::from_json_str(
        r#"{
            "surface": {"width": 1024, "height": 768},
            "show_volume": false,
            "viewport": {"spacing": 4.0},
            "momentum": {"friction": 0.9}
        }"#,
    )
    .expect("parse config");

    assert_eq!(config.surface, SurfaceSize::new(1024, 768));
    assert_eq!(config.surface.device_pixel_ratio, 1.0);
    assert!(!config.show_volume);
    assert_eq!(config.viewport.spacing, 4.0);
    assert_eq!(config.viewport.default_bar_width, 8.0);
    assert_eq!(config.momentum.friction, 0.9);
    assert_eq!(config.momentum.stop_velocity_abs, 0.1);
    assert_eq!(config.layout.price_grid_lines, 10);
    config.validate().expect("valid config");
}

#[test]
fn json_round_trip_preserves_config() {
    let config = ChartEngineConfig::new(SurfaceSize::new(640, 480).with_device_pixel_ratio(2.0))
        .with_show_volume(false);
    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = ChartEngineConfig::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn engine_rejects_invalid_tuning() {
    let config = ChartEngineConfig::from_json_str(r#"{"momentum": {"friction": 1.5}}"#)
        .expect("parse config");
    let err = ChartEngine::new(RecordingSurface::new(), config)
        .err()
        .expect("friction above one must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let config = ChartEngineConfig::from_json_str(r#"{"layout": {"price_grid_lines": 1}}"#)
        .expect("parse config");
    assert!(ChartEngine::new(RecordingSurface::new(), config).is_err());
}

#[test]
fn default_config_builds_an_engine() {
    let engine = ChartEngine::new(RecordingSurface::new(), ChartEngineConfig::default())
        .expect("engine init");
    assert_eq!(engine.size(), SurfaceSize::new(800, 600));
    assert!(engine.show_volume());
    assert!(engine.pending_frame().is_some());
}
