use approx::assert_relative_eq;
use ohlcv_chart::interaction::{GestureState, InteractionMode, MomentumConfig};

fn state_with_velocity(velocity: f64) -> GestureState {
    let mut state = GestureState::new(MomentumConfig::default());
    state.start_momentum(velocity);
    state
}

#[test]
fn velocity_decays_geometrically() {
    let mut state = state_with_velocity(32.0);
    for n in 0..50 {
        let displacement = state.step_momentum().expect("still moving");
        assert_relative_eq!(displacement, 32.0 * 0.97f64.powi(n), max_relative = 1e-12);
    }
    assert_relative_eq!(state.velocity(), 32.0 * 0.97f64.powi(50), max_relative = 1e-12);
}

#[test]
fn momentum_stops_at_threshold_and_stays_stopped() {
    let mut state = state_with_velocity(-20.0);
    let mut steps = 0;
    while state.step_momentum().is_some() {
        steps += 1;
        assert!(steps < 1_000, "momentum never stopped");
    }
    let expected = ((0.1f64 / 20.0).ln() / 0.97f64.ln()).ceil() as usize;
    assert_eq!(steps, expected);
    assert_eq!(state.mode(), InteractionMode::Idle);
    assert!(state.velocity().abs() <= 0.1);
    assert_eq!(state.step_momentum(), None);
}

#[test]
fn slow_release_never_enters_momentum() {
    let mut state = GestureState::default();
    state.begin_drag(0.0, 0.0, 0.0);
    state.drag_move(1.0, 200.0);
    assert!(state.velocity().abs() <= 0.1);
    assert!(!state.end_drag());
    assert_eq!(state.mode(), InteractionMode::Idle);
}

#[test]
fn fast_release_hands_velocity_to_momentum() {
    let mut state = GestureState::default();
    state.begin_drag(100.0, 50.0, 0.0);
    assert_eq!(state.mode(), InteractionMode::Dragging);
    assert_eq!(state.drag_origin(), Some((100.0, 50.0)));
    assert_eq!(state.drag_move(140.0, 20.0), Some(40.0));
    assert_relative_eq!(state.velocity(), 32.0);
    assert!(state.end_drag());
    assert!(state.is_momentum_active());
    assert_eq!(state.drag_origin(), None);
}

#[test]
fn new_drag_cancels_momentum() {
    let mut state = state_with_velocity(50.0);
    state.step_momentum();
    state.begin_drag(10.0, 10.0, 1_000.0);
    assert_eq!(state.mode(), InteractionMode::Dragging);
    assert_eq!(state.velocity(), 0.0);
    assert_eq!(state.step_momentum(), None);
}

#[test]
fn moves_without_drag_are_ignored() {
    let mut state = GestureState::default();
    assert_eq!(state.drag_move(10.0, 100.0), None);
    assert!(!state.end_drag());
}

#[test]
fn wheel_direction_maps_to_zoom_factor() {
    let state = GestureState::default();
    assert_eq!(state.wheel_zoom_factor(-120.0), Some(1.02));
    assert_eq!(state.wheel_zoom_factor(3.0), Some(0.98));
    assert_eq!(state.wheel_zoom_factor(0.0), None);
    assert_eq!(state.wheel_zoom_factor(f64::NAN), None);
}

#[test]
fn custom_friction_is_honoured() {
    let config = MomentumConfig {
        friction: 0.5,
        ..MomentumConfig::default()
    };
    let mut state = GestureState::new(config.validate().expect("valid config"));
    state.start_momentum(8.0);
    assert_eq!(state.step_momentum(), Some(8.0));
    assert_eq!(state.step_momentum(), Some(4.0));
    assert_relative_eq!(state.velocity(), 2.0);
}
