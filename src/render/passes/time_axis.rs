use crate::core::format_bar_time;
use crate::error::ChartResult;
use crate::render::pipeline::SeriesFrame;
use crate::render::surface::DrawingSurface;
use crate::render::{TextBaseline, TextHAlign};

/// Subsampled date labels under the plot, each with a faint vertical line.
pub(crate) fn draw(surface: &mut dyn DrawingSurface, frame: &SeriesFrame<'_>) -> ChartResult<()> {
    if frame.window.is_empty() {
        return Ok(());
    }

    let style = frame.input.style;
    let plot = frame.layout.plot;
    let stride = label_stride(
        frame.input.viewport.visible_count(),
        frame.input.layout.time_label_count,
    );

    surface.set_stroke_color(style.grid_line_color);
    surface.set_line_width(1.0);
    surface.set_font(&style.axis_font);
    surface.set_fill_color(style.axis_label_color);
    surface.set_text_align(TextHAlign::Center);
    surface.set_text_baseline(TextBaseline::Top);

    // Anchor labels to absolute indices so they slide with the bars.
    let first = (stride - frame.window_start % stride) % stride;
    for (k, bar) in frame.window.iter().enumerate().skip(first).step_by(stride) {
        let x = frame.bar_center(k);
        if x < plot.x || x > plot.right() {
            continue;
        }
        surface.begin_path();
        surface.move_to(x, plot.y);
        surface.line_to(x, plot.bottom());
        surface.stroke()?;

        surface.fill_text(&format_bar_time(bar.time), x, plot.bottom() + 4.0)?;
    }
    Ok(())
}

/// Bars between two labels so that about `label_count` fit the view.
#[must_use]
pub(crate) fn label_stride(visible_count: usize, label_count: usize) -> usize {
    (visible_count / label_count.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::label_stride;

    #[test]
    fn stride_never_zero() {
        assert_eq!(label_stride(3, 5), 1);
        assert_eq!(label_stride(200, 5), 40);
    }
}
