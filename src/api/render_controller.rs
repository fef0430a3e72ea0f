use tracing::trace;

use crate::error::ChartResult;
use crate::render::{DrawingSurface, FrameInput, FrameToken, RenderReport, render_frame};

use super::ChartEngine;

impl<S: DrawingSurface> ChartEngine<S> {
    /// Runs one display frame for `token`.
    ///
    /// Stale tokens render nothing and return `Ok(None)`. A live token first
    /// advances momentum by one step, re-arms the scheduler while momentum or
    /// the loading spinner still needs frames, then draws.
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        now_ms: f64,
    ) -> ChartResult<Option<RenderReport>> {
        if !self.scheduler.begin_frame(token) {
            trace!(token = token.id(), "stale frame token ignored");
            return Ok(None);
        }

        if let Some(delta) = self.gestures.step_momentum() {
            self.viewport.pan_by(delta);
            trace!(
                delta,
                velocity = self.gestures.velocity(),
                offset_index = self.viewport.offset_index(),
                "momentum step"
            );
            if self.gestures.is_momentum_active() {
                self.request_redraw();
            }
        }
        if self.loading.is_loading {
            self.request_redraw();
        }

        self.render_now(now_ms).map(Some)
    }

    /// Draws immediately, bypassing the scheduler.
    pub fn render_now(&mut self, now_ms: f64) -> ChartResult<RenderReport> {
        let input = FrameInput {
            size: self.size,
            viewport: self.viewport,
            bars: &self.bars,
            style: &self.style,
            layout: self.layout,
            show_volume: self.show_volume,
            loading: &self.loading,
            now_ms,
        };
        let report = render_frame(&mut self.surface, &input)?;
        trace!(
            passes = report.passes.len(),
            candles = report.candles_drawn,
            overlay_only = report.overlay_only,
            "frame rendered"
        );
        self.last_report = Some(report.clone());
        Ok(report)
    }
}
