use crate::core::{PixelRect, format_price, format_volume};
use crate::error::ChartResult;
use crate::render::pipeline::SeriesFrame;
use crate::render::surface::DrawingSurface;
use crate::render::{TextBaseline, TextHAlign};

const LABEL_PADDING_PX: f64 = 6.0;

/// Evenly spaced horizontal grid lines over the price band, labelled in the
/// right gutter.
pub(crate) fn draw_price_scale(
    surface: &mut dyn DrawingSurface,
    frame: &SeriesFrame<'_>,
) -> ChartResult<()> {
    let style = frame.input.style;
    let plot = frame.layout.plot;
    let lines = frame.input.layout.price_grid_lines;
    let (min_price, max_price) = frame.prices.domain();
    let span = max_price - min_price;

    surface.set_stroke_color(style.grid_line_color);
    surface.set_line_width(1.0);
    surface.set_font(&style.axis_font);
    surface.set_fill_color(style.axis_label_color);
    surface.set_text_align(TextHAlign::Left);
    surface.set_text_baseline(TextBaseline::Middle);

    for i in 0..lines {
        let ratio = i as f64 / (lines - 1) as f64;
        let price = min_price + span * ratio;
        let y = frame.prices.price_to_y(price);

        surface.begin_path();
        surface.move_to(plot.x, y);
        surface.line_to(plot.right(), y);
        surface.stroke()?;

        surface.fill_text(&format_price(price, span), plot.right() + LABEL_PADDING_PX, y)?;
    }
    Ok(())
}

/// Single reference line at half the padded volume maximum.
pub(crate) fn draw_volume_scale(
    surface: &mut dyn DrawingSurface,
    frame: &SeriesFrame<'_>,
    band: PixelRect,
) -> ChartResult<()> {
    let style = frame.input.style;
    let plot = frame.layout.plot;
    let y = band.bottom() - band.height / 2.0;

    surface.set_stroke_color(style.grid_line_color);
    surface.set_line_width(1.0);
    surface.begin_path();
    surface.move_to(plot.x, y);
    surface.line_to(plot.right(), y);
    surface.stroke()?;

    surface.set_font(&style.axis_font);
    surface.set_fill_color(style.axis_label_color);
    surface.set_text_align(TextHAlign::Left);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.fill_text(
        &format_volume(frame.stats.max_volume / 2.0),
        plot.right() + LABEL_PADDING_PX,
        y,
    )
}
