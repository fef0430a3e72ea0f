mod passes;
mod pipeline;
mod primitives;
mod recording;
mod scheduler;
mod style;
mod surface;

pub use passes::candles::{CandleGeometry, MIN_BODY_HEIGHT_PX};
pub use pipeline::{FrameInput, RenderPass, RenderReport, SeriesFrame, render_frame};
pub use primitives::{
    Color, FontSpec, GradientStop, LinearGradient, TextBaseline, TextHAlign,
};
pub use recording::{RecordingSurface, SurfaceCommand};
pub use scheduler::{FrameRequest, FrameScheduler, FrameToken, SchedulerStats};
pub use style::{ChartStyle, FrameLayout, LayoutConfig};
pub use surface::{DrawingSurface, isolated};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
