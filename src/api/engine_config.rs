use serde::{Deserialize, Serialize};

use crate::core::{SurfaceSize, ViewportConfig};
use crate::error::{ChartError, ChartResult};
use crate::interaction::MomentumConfig;
use crate::render::{ChartStyle, LayoutConfig};

/// Everything a host configures when creating a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartEngineConfig {
    pub surface: SurfaceSize,
    /// Toggles the volume histogram and its scale label.
    pub show_volume: bool,
    pub viewport: ViewportConfig,
    pub momentum: MomentumConfig,
    pub style: ChartStyle,
    pub layout: LayoutConfig,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self::new(SurfaceSize::new(800, 600))
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            show_volume: true,
            viewport: ViewportConfig::default(),
            momentum: MomentumConfig::default(),
            style: ChartStyle::default(),
            layout: LayoutConfig::default(),
        }
    }

    #[must_use]
    pub fn with_show_volume(mut self, show_volume: bool) -> Self {
        self.show_volume = show_volume;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_momentum(mut self, momentum: MomentumConfig) -> Self {
        self.momentum = momentum;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Parses a config from JSON; omitted fields keep their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        self.viewport.validate()?;
        self.momentum.validate()?;
        self.style.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}
