use serde::{Deserialize, Serialize};

use crate::core::{PixelRect, SurfaceSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FontSpec};

/// Theme colors and fonts for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    pub axis_label_color: Color,
    pub candle_up_color: Color,
    pub candle_down_color: Color,
    pub wick_up_color: Color,
    pub wick_down_color: Color,
    pub close_curve_color: Color,
    pub close_curve_width: f64,
    pub volume_up_color: Color,
    pub volume_down_color: Color,
    pub axis_font: FontSpec,

    pub overlay_backdrop_color: Color,
    pub overlay_panel_color: Color,
    pub overlay_border_color: Color,
    pub overlay_text_color: Color,
    pub progress_track_color: Color,
    pub progress_start_color: Color,
    pub progress_end_color: Color,
    pub spinner_color: Color,
    pub overlay_font: FontSpec,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let up = Color::rgb8(38, 166, 154);
        let down = Color::rgb8(239, 83, 80);
        Self {
            background_color: Color::rgb8(19, 23, 34),
            grid_line_color: Color::rgba(1.0, 1.0, 1.0, 0.06),
            axis_label_color: Color::rgb8(178, 181, 190),
            candle_up_color: up,
            candle_down_color: down,
            wick_up_color: up,
            wick_down_color: down,
            close_curve_color: Color::rgba(0.4, 0.6, 1.0, 0.45),
            close_curve_width: 1.5,
            volume_up_color: up.with_alpha(0.45),
            volume_down_color: down.with_alpha(0.45),
            axis_font: FontSpec::new("sans-serif", 11.0),

            overlay_backdrop_color: Color::rgba(0.0, 0.0, 0.0, 0.55),
            overlay_panel_color: Color::rgb8(30, 34, 45),
            overlay_border_color: Color::rgba(1.0, 1.0, 1.0, 0.12),
            overlay_text_color: Color::rgb8(220, 222, 228),
            progress_track_color: Color::rgba(1.0, 1.0, 1.0, 0.1),
            progress_start_color: Color::rgb8(41, 98, 255),
            progress_end_color: Color::rgb8(0, 188, 212),
            spinner_color: Color::rgb8(41, 98, 255),
            overlay_font: FontSpec::new("sans-serif", 13.0),
        }
    }
}

impl ChartStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.grid_line_color,
            self.axis_label_color,
            self.candle_up_color,
            self.candle_down_color,
            self.wick_up_color,
            self.wick_down_color,
            self.close_curve_color,
            self.volume_up_color,
            self.volume_down_color,
            self.overlay_backdrop_color,
            self.overlay_panel_color,
            self.overlay_border_color,
            self.overlay_text_color,
            self.progress_track_color,
            self.progress_start_color,
            self.progress_end_color,
            self.spinner_color,
        ] {
            color.validate()?;
        }
        if !self.close_curve_width.is_finite() || self.close_curve_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "close curve width must be finite and > 0".to_owned(),
            ));
        }
        for font in [&self.axis_font, &self.overlay_font] {
            if !font.size_px.is_finite() || font.size_px <= 0.0 {
                return Err(ChartError::InvalidData(
                    "font size must be finite and > 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Fixed layout budgets in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub price_gutter_width: f64,
    pub time_axis_height: f64,
    pub top_margin: f64,
    /// Height of the volume histogram band at the bottom of the plot.
    pub volume_band_height: f64,
    pub volume_band_gap: f64,
    pub price_grid_lines: usize,
    pub time_label_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            price_gutter_width: 72.0,
            time_axis_height: 24.0,
            top_margin: 12.0,
            volume_band_height: 80.0,
            volume_band_gap: 6.0,
            price_grid_lines: 10,
            time_label_count: 5,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("price_gutter_width", self.price_gutter_width),
            ("time_axis_height", self.time_axis_height),
            ("top_margin", self.top_margin),
            ("volume_band_height", self.volume_band_height),
            ("volume_band_gap", self.volume_band_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout {name} must be finite and >= 0"
                )));
            }
        }
        if self.price_grid_lines < 2 {
            return Err(ChartError::InvalidData(
                "layout price_grid_lines must be >= 2".to_owned(),
            ));
        }
        if self.time_label_count == 0 {
            return Err(ChartError::InvalidData(
                "layout time_label_count must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Splits the surface into plot, price band and volume band.
    #[must_use]
    pub fn resolve(self, size: SurfaceSize, show_volume: bool) -> FrameLayout {
        let width = f64::from(size.width);
        let height = f64::from(size.height);
        let plot = PixelRect::new(
            0.0,
            self.top_margin,
            (width - self.price_gutter_width).max(1.0),
            (height - self.top_margin - self.time_axis_height).max(1.0),
        );

        let volume_band = show_volume.then(|| {
            let band_height = self.volume_band_height.min(plot.height / 2.0);
            PixelRect::new(plot.x, plot.bottom() - band_height, plot.width, band_height)
        });
        let price_band = match volume_band {
            Some(band) => PixelRect::new(
                plot.x,
                plot.y,
                plot.width,
                (band.y - self.volume_band_gap - plot.y).max(1.0),
            ),
            None => plot,
        };

        FrameLayout {
            surface: PixelRect::new(0.0, 0.0, width, height),
            plot,
            price_band,
            volume_band,
        }
    }
}

/// Resolved rectangles for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub surface: PixelRect,
    /// Area where bars are laid out horizontally.
    pub plot: PixelRect,
    /// Candle area; prices map onto its vertical extent.
    pub price_band: PixelRect,
    pub volume_band: Option<PixelRect>,
}
