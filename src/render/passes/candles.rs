use crate::error::ChartResult;
use crate::render::pipeline::SeriesFrame;
use crate::render::surface::DrawingSurface;

/// Flat bars still get a body this tall.
pub const MIN_BODY_HEIGHT_PX: f64 = 1.0;

/// Pixel geometry of one candle. `width` is cut at the plot's right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub left: f64,
    pub width: f64,
    pub center_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub is_bullish: bool,
}

/// Draws wicks and bodies for the visible window; returns how many candles
/// were drawn.
pub(crate) fn draw(surface: &mut dyn DrawingSurface, frame: &SeriesFrame<'_>) -> ChartResult<usize> {
    let style = frame.input.style;
    let mut drawn = 0;
    surface.set_line_width(1.0);

    for k in 0..frame.window.len() {
        let left = frame.bar_left(k);
        if !frame.overlaps_plot(left) {
            continue;
        }
        let candle = project(frame, k);

        let (wick_color, body_color) = if candle.is_bullish {
            (style.wick_up_color, style.candle_up_color)
        } else {
            (style.wick_down_color, style.candle_down_color)
        };

        if candle.center_x <= frame.layout.plot.right() {
            surface.begin_path();
            surface.move_to(candle.center_x, candle.wick_top);
            surface.line_to(candle.center_x, candle.wick_bottom);
            surface.set_stroke_color(wick_color);
            surface.stroke()?;
        }

        surface.set_fill_color(body_color);
        surface.fill_rect(candle.left, candle.body_top, candle.width, candle.body_height)?;
        drawn += 1;
    }
    Ok(drawn)
}

/// Maps the `k`-th window bar to pixel geometry.
pub(crate) fn project(frame: &SeriesFrame<'_>, k: usize) -> CandleGeometry {
    let bar = &frame.window[k];
    let prices = frame.prices;
    let left = frame.bar_left(k);
    let bar_width = frame.input.viewport.bar_width();

    let open_y = prices.price_to_y(bar.open);
    let close_y = prices.price_to_y(bar.close);
    let body_top = open_y.min(close_y);
    let body_height = (open_y.max(close_y) - body_top).max(MIN_BODY_HEIGHT_PX);

    CandleGeometry {
        left,
        width: frame.clipped_width(left),
        center_x: left + bar_width / 2.0,
        wick_top: prices.price_to_y(bar.high),
        wick_bottom: prices.price_to_y(bar.low),
        body_top,
        body_height,
        is_bullish: bar.is_bullish(),
    }
}
