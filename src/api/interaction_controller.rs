use tracing::{debug, trace};

use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::interaction::{EventResponse, InputEvent, TouchPoints};
use crate::render::DrawingSurface;

use super::ChartEngine;

impl<S: DrawingSurface> ChartEngine<S> {
    /// Dispatches one host input event.
    ///
    /// Only a surface failure during resize is returned as an error; all
    /// other anomalies (non-finite coordinates, zero-sized resizes) are
    /// dropped.
    pub fn handle_event(&mut self, event: InputEvent) -> ChartResult<EventResponse> {
        let mut response = EventResponse::default();
        match event {
            InputEvent::PointerDown { x, y, time_ms } => {
                self.gestures.begin_drag(x, y, time_ms);
            }
            InputEvent::PointerMove { x, time_ms, .. } => {
                self.drag_to(x, time_ms, &mut response);
            }
            InputEvent::PointerUp { .. } => {
                self.release_drag(&mut response);
            }
            InputEvent::Wheel { x, delta_y, .. } => {
                response.prevent_default = true;
                if let Some(factor) = self.gestures.wheel_zoom_factor(delta_y) {
                    let pivot_x = x - self.plot_left();
                    if self.viewport.zoom_at(pivot_x, factor) {
                        self.mark_dirty(&mut response);
                    }
                }
            }
            InputEvent::TouchStart { touches, time_ms } => {
                response.prevent_default = true;
                match single_touch(&touches) {
                    Some((x, y)) => self.gestures.begin_drag(x, y, time_ms),
                    None => self.gestures.abort_drag(),
                }
            }
            InputEvent::TouchMove { touches, time_ms } => {
                response.prevent_default = true;
                if let Some((x, _)) = single_touch(&touches) {
                    self.drag_to(x, time_ms, &mut response);
                }
            }
            InputEvent::TouchEnd { touches, .. } => {
                response.prevent_default = true;
                if touches.is_empty() {
                    self.release_drag(&mut response);
                } else {
                    self.gestures.abort_drag();
                }
            }
            InputEvent::DoubleClick { .. } => {
                self.apply_reset();
                self.mark_dirty(&mut response);
            }
            InputEvent::Resize(size) => {
                if self.apply_resize(size)? {
                    self.mark_dirty(&mut response);
                }
            }
        }
        Ok(response)
    }

    /// Zooms around a plot-relative pixel. Returns `true` when the view changed.
    pub fn zoom_at(&mut self, pivot_x: f64, factor: f64) -> bool {
        let changed = self.viewport.zoom_at(pivot_x, factor);
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Pans by a pixel delta. Positive deltas reveal older bars.
    pub fn pan_by(&mut self, delta_px: f64) -> bool {
        let changed = self.viewport.pan_by(delta_px);
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Restores the default bar width, shows the newest bars and cancels
    /// momentum.
    pub fn reset_view(&mut self) {
        self.apply_reset();
        self.request_redraw();
    }

    /// Applies a new surface size. Returns `false` for sizes without area.
    pub fn resize(&mut self, size: SurfaceSize) -> ChartResult<bool> {
        let resized = self.apply_resize(size)?;
        if resized {
            self.request_redraw();
        }
        Ok(resized)
    }

    fn apply_reset(&mut self) {
        self.gestures.stop_momentum();
        self.viewport.reset_to_latest(self.default_bar_width);
        debug!(
            offset_index = self.viewport.offset_index(),
            bar_width = self.viewport.bar_width(),
            "view reset to latest bars"
        );
    }

    fn apply_resize(&mut self, size: SurfaceSize) -> ChartResult<bool> {
        if !size.is_valid() {
            trace!(
                width = size.width,
                height = size.height,
                "ignoring empty resize"
            );
            return Ok(false);
        }
        self.surface.resize(size)?;
        self.size = size;
        self.sync_plot_width();
        debug!(
            width = size.width,
            height = size.height,
            device_pixel_ratio = size.device_pixel_ratio,
            visible_count = self.viewport.visible_count(),
            "surface resized"
        );
        Ok(true)
    }

    fn drag_to(&mut self, x: f64, time_ms: f64, response: &mut EventResponse) {
        let Some(delta) = self.gestures.drag_move(x, time_ms) else {
            return;
        };
        if self.viewport.pan_by(delta) {
            self.mark_dirty(response);
        }
    }

    fn release_drag(&mut self, response: &mut EventResponse) {
        if self.gestures.end_drag() {
            trace!(velocity = self.gestures.velocity(), "momentum started");
            self.mark_dirty(response);
        }
    }

    fn mark_dirty(&mut self, response: &mut EventResponse) {
        response.redraw_requested = true;
        if self.request_redraw().is_armed() {
            response.frame_armed = true;
        }
    }

    fn plot_left(&self) -> f64 {
        self.layout.resolve(self.size, self.show_volume).plot.x
    }
}

fn single_touch(touches: &TouchPoints) -> Option<(f64, f64)> {
    match touches.as_slice() {
        [only] => Some((only.x, only.y)),
        _ => None,
    }
}
