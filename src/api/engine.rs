use tracing::debug;

use crate::core::{Bar, SurfaceSize, Viewport};
use crate::data::LoadingState;
use crate::error::ChartResult;
use crate::interaction::{GestureState, InteractionMode};
use crate::render::{
    ChartStyle, DrawingSurface, FrameRequest, FrameScheduler, FrameToken, LayoutConfig,
    RenderReport, SchedulerStats,
};

use super::ChartEngineConfig;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the viewport, gesture state, frame scheduler, bar
/// array and loading state, and draws into the surface it was built with.
/// Everything runs on the host's UI thread: mutate, then let the scheduler
/// coalesce redraws into the next display frame.
pub struct ChartEngine<S: DrawingSurface> {
    pub(super) surface: S,
    pub(super) size: SurfaceSize,
    pub(super) viewport: Viewport,
    pub(super) default_bar_width: f64,
    pub(super) gestures: GestureState,
    pub(super) scheduler: FrameScheduler,
    pub(super) bars: Vec<Bar>,
    pub(super) loading: LoadingState,
    pub(super) show_volume: bool,
    pub(super) style: ChartStyle,
    pub(super) layout: LayoutConfig,
    pub(super) last_report: Option<RenderReport>,
}

impl<S: DrawingSurface> ChartEngine<S> {
    /// Builds an engine. Fails when the config is invalid or the surface has
    /// no drawable area.
    pub fn new(mut surface: S, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        surface.resize(config.surface)?;

        let mut viewport = Viewport::new(config.viewport)?;
        let layout = config.layout.resolve(config.surface, config.show_volume);
        viewport.set_plot_width(layout.plot.width);

        let mut engine = Self {
            surface,
            size: config.surface,
            viewport,
            default_bar_width: config.viewport.default_bar_width,
            gestures: GestureState::new(config.momentum),
            scheduler: FrameScheduler::new(),
            bars: Vec::new(),
            loading: LoadingState::default(),
            show_volume: config.show_volume,
            style: config.style,
            layout: config.layout,
            last_report: None,
        };
        engine.request_redraw();
        debug!(
            width = engine.size.width,
            height = engine.size.height,
            visible_count = engine.viewport.visible_count(),
            "chart engine created"
        );
        Ok(engine)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[must_use]
    pub fn loading_state(&self) -> &LoadingState {
        &self.loading
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.gestures.mode()
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gestures
    }

    #[must_use]
    pub fn show_volume(&self) -> bool {
        self.show_volume
    }

    pub fn set_show_volume(&mut self, show_volume: bool) {
        if self.show_volume == show_volume {
            return;
        }
        self.show_volume = show_volume;
        self.sync_plot_width();
        self.request_redraw();
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        style.validate()?;
        self.style = style;
        self.request_redraw();
        Ok(())
    }

    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout
    }

    /// Arms a redraw for the next display frame unless one is pending.
    pub fn request_redraw(&mut self) -> FrameRequest {
        self.scheduler.request_redraw()
    }

    /// Token the host should run [`ChartEngine::on_frame`] with, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.scheduler.pending()
    }

    #[must_use]
    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    #[must_use]
    pub fn last_render_report(&self) -> Option<&RenderReport> {
        self.last_report.as_ref()
    }

    /// Re-derives how many bars fit after a size or layout change.
    pub(super) fn sync_plot_width(&mut self) {
        let layout = self.layout.resolve(self.size, self.show_volume);
        self.viewport.set_plot_width(layout.plot.width);
    }
}
