use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Bar, PriceMapper, RangeStats, SurfaceSize, Viewport, compute_range_stats};
use crate::data::LoadingState;
use crate::error::ChartResult;
use crate::render::passes;
use crate::render::style::{ChartStyle, FrameLayout, LayoutConfig};
use crate::render::surface::{DrawingSurface, isolated};

/// Immutable inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub size: SurfaceSize,
    pub viewport: Viewport,
    pub bars: &'a [Bar],
    pub style: &'a ChartStyle,
    pub layout: LayoutConfig,
    pub show_volume: bool,
    pub loading: &'a LoadingState,
    /// Wall-clock milliseconds, drives the loading spinner.
    pub now_ms: f64,
}

/// Per-frame series context shared by the passes after range statistics.
#[derive(Debug, Clone, Copy)]
pub struct SeriesFrame<'a> {
    pub input: &'a FrameInput<'a>,
    pub layout: FrameLayout,
    /// Absolute index of `window[0]`.
    pub window_start: usize,
    pub window: &'a [Bar],
    pub stats: RangeStats,
    pub prices: PriceMapper,
}

impl SeriesFrame<'_> {
    /// Left edge of the `k`-th window bar in surface pixels.
    #[must_use]
    pub fn bar_left(&self, k: usize) -> f64 {
        self.layout.plot.x + self.input.viewport.bar_left_px((self.window_start + k) as f64)
    }

    #[must_use]
    pub fn bar_center(&self, k: usize) -> f64 {
        self.bar_left(k) + self.input.viewport.bar_width() / 2.0
    }

    /// Whether a bar slot starting at `left` overlaps the plot horizontally.
    #[must_use]
    pub fn overlaps_plot(&self, left: f64) -> bool {
        let right = left + self.input.viewport.bar_width();
        right >= self.layout.plot.x && left < self.layout.plot.right()
    }

    /// Bar width cut at the right edge of the plot so nothing reaches the
    /// price gutter.
    #[must_use]
    pub fn clipped_width(&self, left: f64) -> f64 {
        self.input
            .viewport
            .bar_width()
            .min(self.layout.plot.right() - left)
            .max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderPass {
    Background,
    LoadingOverlay,
    CloseCurve,
    Candles,
    Volume,
    PriceScale,
    VolumeScale,
    TimeAxis,
}

/// What one frame drew.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderReport {
    pub passes: Vec<RenderPass>,
    /// The loading overlay replaced the chart this frame.
    pub overlay_only: bool,
    pub stats: Option<RangeStats>,
    pub candles_drawn: usize,
    pub volume_bars_drawn: usize,
}

/// Runs every pass in order against `surface`.
///
/// Each pass runs inside its own save/restore scope. While loading, the
/// overlay is the last pass of the frame.
pub fn render_frame(
    surface: &mut dyn DrawingSurface,
    input: &FrameInput<'_>,
) -> ChartResult<RenderReport> {
    let mut report = RenderReport::default();
    let layout = input.layout.resolve(input.size, input.show_volume);

    surface.set_scale(input.size.device_pixel_ratio, input.size.device_pixel_ratio);

    isolated(surface, |s| passes::background::draw(s, input, &layout))?;
    report.passes.push(RenderPass::Background);

    if input.loading.is_loading {
        isolated(surface, |s| passes::loading_overlay::draw(s, input, &layout))?;
        report.passes.push(RenderPass::LoadingOverlay);
        report.overlay_only = true;
        return Ok(report);
    }

    let window = input.viewport.visible_window();
    let stats = compute_range_stats(input.bars, window.start, window.count);
    let window_start = window.start.min(input.bars.len());
    let frame = SeriesFrame {
        input,
        layout,
        window_start,
        window: &input.bars[window_start..window_start + stats.bar_count],
        stats,
        prices: PriceMapper::new(
            stats.min_price,
            stats.max_price,
            layout.price_band.y,
            layout.price_band.bottom(),
        ),
    };
    report.stats = Some(stats);
    trace!(
        window_start,
        bar_count = stats.bar_count,
        min_price = stats.min_price,
        max_price = stats.max_price,
        "frame range resolved"
    );

    isolated(surface, |s| passes::close_curve::draw(s, &frame))?;
    report.passes.push(RenderPass::CloseCurve);

    isolated(surface, |s| {
        report.candles_drawn = passes::candles::draw(s, &frame)?;
        Ok(())
    })?;
    report.passes.push(RenderPass::Candles);

    if let Some(band) = layout.volume_band {
        isolated(surface, |s| {
            report.volume_bars_drawn = passes::volume::draw(s, &frame, band)?;
            Ok(())
        })?;
        report.passes.push(RenderPass::Volume);
    }

    isolated(surface, |s| passes::price_scale::draw_price_scale(s, &frame))?;
    report.passes.push(RenderPass::PriceScale);

    if let Some(band) = layout.volume_band {
        isolated(surface, |s| {
            passes::price_scale::draw_volume_scale(s, &frame, band)
        })?;
        report.passes.push(RenderPass::VolumeScale);
    }

    isolated(surface, |s| passes::time_axis::draw(s, &frame))?;
    report.passes.push(RenderPass::TimeAxis);

    Ok(report)
}
