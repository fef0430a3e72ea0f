use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Tuning for the logical-index ↔ pixel transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Bar width restored by a view reset.
    pub default_bar_width: f64,
    pub max_bar_width: f64,
    /// Gap between neighbouring bars, in pixels.
    pub spacing: f64,
    /// Bars shown until the plot width is known.
    pub visible_count: usize,
    /// How many bars the view may scroll past the newest bar.
    pub overscroll_slack: f64,
    /// Zoom changes smaller than this many pixels of bar width are dropped.
    pub min_zoom_delta_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_bar_width: 8.0,
            max_bar_width: 64.0,
            spacing: 2.0,
            visible_count: 200,
            overscroll_slack: 5.0,
            min_zoom_delta_px: 0.01,
        }
    }
}

impl ViewportConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.max_bar_width.is_finite() || self.max_bar_width < MIN_BAR_WIDTH {
            return Err(ChartError::InvalidData(
                "viewport max_bar_width must be finite and >= 1".to_owned(),
            ));
        }
        if !self.default_bar_width.is_finite()
            || !(MIN_BAR_WIDTH..=self.max_bar_width).contains(&self.default_bar_width)
        {
            return Err(ChartError::InvalidData(
                "viewport default_bar_width must be within [1, max_bar_width]".to_owned(),
            ));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ChartError::InvalidData(
                "viewport spacing must be finite and >= 0".to_owned(),
            ));
        }
        if self.visible_count == 0 {
            return Err(ChartError::InvalidData(
                "viewport visible_count must be > 0".to_owned(),
            ));
        }
        if !self.overscroll_slack.is_finite() || self.overscroll_slack < 0.0 {
            return Err(ChartError::InvalidData(
                "viewport overscroll_slack must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_zoom_delta_px.is_finite() || self.min_zoom_delta_px < 0.0 {
            return Err(ChartError::InvalidData(
                "viewport min_zoom_delta_px must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

pub const MIN_BAR_WIDTH: f64 = 1.0;

/// Contiguous index window selected for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub start: usize,
    pub count: usize,
}

/// Mapping between the fractional logical bar index and horizontal pixels.
///
/// Invariants kept by every mutator:
/// - `offset_index` in `[0, max(0, total_bars - visible_count + slack)]`
/// - `bar_width` in `[1, max_bar_width]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    offset_index: f64,
    bar_width: f64,
    spacing: f64,
    visible_count: usize,
    max_bar_width: f64,
    overscroll_slack: f64,
    min_zoom_delta_px: f64,
    total_bars: usize,
    plot_width: Option<f64>,
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            offset_index: 0.0,
            bar_width: config.default_bar_width,
            spacing: config.spacing,
            visible_count: config.visible_count,
            max_bar_width: config.max_bar_width,
            overscroll_slack: config.overscroll_slack,
            min_zoom_delta_px: config.min_zoom_delta_px,
            total_bars: 0,
            plot_width: None,
        })
    }

    #[must_use]
    pub fn offset_index(&self) -> f64 {
        self.offset_index
    }

    #[must_use]
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    #[must_use]
    pub fn max_bar_width(&self) -> f64 {
        self.max_bar_width
    }

    #[must_use]
    pub fn total_bars(&self) -> usize {
        self.total_bars
    }

    /// Horizontal distance between the left edges of two neighbouring bars.
    #[must_use]
    pub fn bar_step(&self) -> f64 {
        self.bar_width + self.spacing
    }

    /// Upper clamp bound for `offset_index`.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.total_bars as f64 - self.visible_count as f64 + self.overscroll_slack).max(0.0)
    }

    /// Fractional logical index under a pixel column.
    #[must_use]
    pub fn index_at_pixel(&self, pixel_x: f64) -> f64 {
        self.offset_index + pixel_x / self.bar_step()
    }

    /// Left edge of the bar slot for `index`.
    #[must_use]
    pub fn bar_left_px(&self, index: f64) -> f64 {
        (index - self.offset_index) * self.bar_step()
    }

    #[must_use]
    pub fn bar_center_px(&self, index: f64) -> f64 {
        self.bar_left_px(index) + self.bar_width / 2.0
    }

    /// Scales `bar_width` by `factor` keeping the bar under `pivot_x` fixed.
    ///
    /// Returns `false` when the request is ignored (non-finite input, or a
    /// width change below the configured threshold).
    pub fn zoom_at(&mut self, pivot_x: f64, factor: f64) -> bool {
        if !pivot_x.is_finite() || !factor.is_finite() || factor <= 0.0 {
            trace!(pivot_x, factor, "ignoring non-finite zoom request");
            return false;
        }

        let center_index = self.index_at_pixel(pivot_x);
        let new_bar_width = (self.bar_width * factor).clamp(MIN_BAR_WIDTH, self.max_bar_width);
        if (new_bar_width - self.bar_width).abs() < self.min_zoom_delta_px {
            return false;
        }

        let new_offset = center_index - pivot_x / (new_bar_width + self.spacing);
        self.bar_width = new_bar_width;
        self.refresh_visible_count();
        self.offset_index = self.clamp_offset(new_offset);
        trace!(
            bar_width = self.bar_width,
            offset_index = self.offset_index,
            "viewport zoomed"
        );
        true
    }

    /// Moves the view by a pixel delta. Positive deltas reveal older bars.
    ///
    /// Returns `true` when `offset_index` changed.
    pub fn pan_by(&mut self, delta_px: f64) -> bool {
        if !delta_px.is_finite() {
            trace!(delta_px, "ignoring non-finite pan delta");
            return false;
        }

        let before = self.offset_index;
        self.offset_index = self.clamp_offset(self.offset_index - delta_px / self.bar_step());
        trace!(delta_px, offset_index = self.offset_index, "viewport panned");
        self.offset_index != before
    }

    /// Updates the data length and re-applies the offset clamp.
    pub fn set_total_bars(&mut self, total_bars: usize) {
        self.total_bars = total_bars;
        self.offset_index = self.clamp_offset(self.offset_index);
    }

    /// Updates the plot width and derives how many bars fit into it.
    pub fn set_plot_width(&mut self, plot_width: f64) {
        if !plot_width.is_finite() || plot_width <= 0.0 {
            trace!(plot_width, "ignoring invalid plot width");
            return;
        }
        self.plot_width = Some(plot_width);
        self.refresh_visible_count();
        self.offset_index = self.clamp_offset(self.offset_index);
    }

    /// Restores `bar_width` and scrolls so the newest bars fill the view.
    pub fn reset_to_latest(&mut self, bar_width: f64) {
        if bar_width.is_finite() {
            self.bar_width = bar_width.clamp(MIN_BAR_WIDTH, self.max_bar_width);
        }
        self.refresh_visible_count();
        self.offset_index = self.latest_offset();
    }

    /// Offset that puts the newest bar at the right edge.
    #[must_use]
    pub fn latest_offset(&self) -> f64 {
        (self.total_bars as f64 - self.visible_count as f64).max(0.0)
    }

    /// Index window covering the view, including a partially visible bar on
    /// the right edge. May extend past the data; callers truncate.
    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow {
        VisibleWindow {
            start: self.offset_index.floor() as usize,
            count: self.visible_count + 1,
        }
    }

    fn refresh_visible_count(&mut self) {
        if let Some(width) = self.plot_width {
            self.visible_count = ((width / self.bar_step()).ceil() as usize).max(1);
        }
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(total: usize) -> Viewport {
        let mut viewport = Viewport::new(ViewportConfig::default()).expect("viewport");
        viewport.set_total_bars(total);
        viewport
    }

    #[test]
    fn max_offset_allows_overscroll_slack() {
        let viewport = loaded(1_000);
        assert_eq!(viewport.max_offset(), 1_000.0 - 200.0 + 5.0);
    }

    #[test]
    fn tiny_zoom_is_dropped() {
        let mut viewport = loaded(1_000);
        assert!(!viewport.zoom_at(100.0, 1.0001));
        assert_eq!(viewport.bar_width(), 8.0);
    }

    #[test]
    fn plot_width_drives_visible_count() {
        let mut viewport = loaded(1_000);
        viewport.set_plot_width(995.0);
        assert_eq!(viewport.visible_count(), 100);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ViewportConfig {
            default_bar_width: 100.0,
            ..ViewportConfig::default()
        };
        assert!(Viewport::new(config).is_err());
    }
}
