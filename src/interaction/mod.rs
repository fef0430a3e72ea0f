mod events;

pub use events::{EventResponse, InputEvent, TouchPoint, TouchPoints};

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// A pointer or single touch is held down and pans the view.
    Dragging,
    /// Released with motion; the view keeps drifting and decays each frame.
    Momentum,
}

/// Tuning for drag sampling, momentum decay and wheel zoom.
///
/// The defaults are empirically tuned rather than derived; hosts may change
/// them freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Velocity multiplier applied after each momentum step.
    pub friction: f64,
    /// Momentum stops once `abs(velocity)` is at or below this many pixels/frame.
    pub stop_velocity_abs: f64,
    /// Nominal display frame used as the velocity unit.
    pub frame_interval_ms: f64,
    /// Drag-move samples closer than this are dropped.
    pub min_move_interval_ms: f64,
    /// Relative bar-width change per wheel notch.
    pub wheel_zoom_step: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            friction: 0.97,
            stop_velocity_abs: 0.1,
            frame_interval_ms: 16.0,
            min_move_interval_ms: 16.0,
            wheel_zoom_step: 0.02,
        }
    }
}

impl MomentumConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.friction.is_finite() || self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(ChartError::InvalidData(
                "momentum friction must be finite and in (0, 1)".to_owned(),
            ));
        }
        for (name, value) in [
            ("stop_velocity_abs", self.stop_velocity_abs),
            ("frame_interval_ms", self.frame_interval_ms),
            ("min_move_interval_ms", self.min_move_interval_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "momentum {name} must be finite and > 0"
                )));
            }
        }
        if !self.wheel_zoom_step.is_finite()
            || self.wheel_zoom_step <= 0.0
            || self.wheel_zoom_step >= 1.0
        {
            return Err(ChartError::InvalidData(
                "wheel_zoom_step must be finite and in (0, 1)".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Transient state of one drag, alive between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    origin_x: f64,
    origin_y: f64,
    last_x: f64,
    last_time_ms: f64,
}

/// Pointer/touch state machine producing pixel deltas for the viewport.
///
/// It never touches the viewport itself: every method returns the delta the
/// caller should apply, which keeps the physics testable in isolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    mode: InteractionMode,
    config: MomentumConfig,
    session: Option<DragSession>,
    velocity_px_per_frame: f64,
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new(MomentumConfig::default())
    }
}

impl GestureState {
    #[must_use]
    pub fn new(config: MomentumConfig) -> Self {
        Self {
            mode: InteractionMode::Idle,
            config,
            session: None,
            velocity_px_per_frame: 0.0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn config(&self) -> MomentumConfig {
        self.config
    }

    pub fn set_config(&mut self, config: MomentumConfig) {
        self.config = config;
    }

    /// Current pan velocity in pixels per nominal frame.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity_px_per_frame
    }

    /// Position where the current drag started.
    #[must_use]
    pub fn drag_origin(&self) -> Option<(f64, f64)> {
        self.session.map(|s| (s.origin_x, s.origin_y))
    }

    #[must_use]
    pub fn is_momentum_active(&self) -> bool {
        self.mode == InteractionMode::Momentum
    }

    /// Starts a drag session. Any in-flight momentum is dropped.
    pub fn begin_drag(&mut self, x: f64, y: f64, time_ms: f64) {
        if !x.is_finite() || !time_ms.is_finite() {
            return;
        }
        self.session = Some(DragSession {
            origin_x: x,
            origin_y: y,
            last_x: x,
            last_time_ms: time_ms,
        });
        self.velocity_px_per_frame = 0.0;
        self.mode = InteractionMode::Dragging;
    }

    /// Samples a drag move and returns the pixel delta to pan by.
    ///
    /// Returns `None` when no drag is active, the sample is non-finite, or it
    /// arrived sooner than `min_move_interval_ms` after the previous one.
    pub fn drag_move(&mut self, x: f64, time_ms: f64) -> Option<f64> {
        let config = self.config;
        let session = self.session.as_mut()?;
        if !x.is_finite() || !time_ms.is_finite() {
            return None;
        }

        let elapsed_ms = time_ms - session.last_time_ms;
        if elapsed_ms < config.min_move_interval_ms {
            return None;
        }

        let delta = x - session.last_x;
        session.last_x = x;
        session.last_time_ms = time_ms;
        self.velocity_px_per_frame = delta / elapsed_ms * config.frame_interval_ms;
        Some(delta)
    }

    /// Ends the drag. Returns `true` when momentum takes over.
    pub fn end_drag(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        if self.velocity_px_per_frame.abs() > self.config.stop_velocity_abs {
            self.mode = InteractionMode::Momentum;
            true
        } else {
            self.mode = InteractionMode::Idle;
            self.velocity_px_per_frame = 0.0;
            false
        }
    }

    /// Drops the drag session without handing off to momentum.
    pub fn abort_drag(&mut self) {
        self.session = None;
        self.mode = InteractionMode::Idle;
        self.velocity_px_per_frame = 0.0;
    }

    /// Puts the state straight into momentum with the given velocity.
    pub fn start_momentum(&mut self, velocity_px_per_frame: f64) {
        if !velocity_px_per_frame.is_finite()
            || velocity_px_per_frame.abs() <= self.config.stop_velocity_abs
        {
            self.stop_momentum();
            return;
        }
        self.session = None;
        self.velocity_px_per_frame = velocity_px_per_frame;
        self.mode = InteractionMode::Momentum;
    }

    /// Advances momentum by one display frame.
    ///
    /// Returns the pixel delta to pan by, or `None` once momentum is over.
    /// Reaching the stop threshold is terminal until the next drag.
    pub fn step_momentum(&mut self) -> Option<f64> {
        if self.mode != InteractionMode::Momentum {
            return None;
        }
        if self.velocity_px_per_frame.abs() <= self.config.stop_velocity_abs {
            self.stop_momentum();
            return None;
        }

        let displacement = self.velocity_px_per_frame;
        self.velocity_px_per_frame *= self.config.friction;
        if self.velocity_px_per_frame.abs() <= self.config.stop_velocity_abs {
            self.mode = InteractionMode::Idle;
        }
        Some(displacement)
    }

    pub fn stop_momentum(&mut self) {
        if self.mode == InteractionMode::Momentum {
            self.mode = InteractionMode::Idle;
        }
        self.velocity_px_per_frame = 0.0;
    }

    /// Maps a wheel delta to a multiplicative bar-width factor.
    ///
    /// Scrolling up (`delta_y < 0`) zooms in.
    #[must_use]
    pub fn wheel_zoom_factor(&self, delta_y: f64) -> Option<f64> {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return None;
        }
        let step = self.config.wheel_zoom_step;
        Some(if delta_y < 0.0 { 1.0 + step } else { 1.0 - step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_samples_are_throttled() {
        let mut state = GestureState::default();
        state.begin_drag(100.0, 10.0, 0.0);
        assert_eq!(state.drag_move(110.0, 5.0), None);
        assert_eq!(state.drag_move(120.0, 16.0), Some(20.0));
    }

    #[test]
    fn velocity_is_scaled_to_nominal_frame() {
        let mut state = GestureState::default();
        state.begin_drag(0.0, 0.0, 0.0);
        state.drag_move(64.0, 32.0);
        assert!((state.velocity() - 32.0).abs() <= 1e-12);
    }

    #[test]
    fn release_without_motion_goes_idle() {
        let mut state = GestureState::default();
        state.begin_drag(0.0, 0.0, 0.0);
        assert!(!state.end_drag());
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = MomentumConfig {
            friction: 1.0,
            ..MomentumConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
