//! Host-facing chart facade.

mod data_controller;
mod engine;
mod engine_config;
mod interaction_controller;
mod render_controller;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
