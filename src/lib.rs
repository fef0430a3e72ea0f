//! ohlcv-chart: interactive OHLC + volume chart core.
//!
//! A continuous viewport over an unbounded bar index, driven by pointer and
//! touch gestures with momentum, feeding an ordered per-frame render pipeline
//! that draws into any [`render::DrawingSurface`].

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
