use crate::error::ChartResult;
use crate::render::pipeline::SeriesFrame;
use crate::render::surface::DrawingSurface;

/// Decorative smoothed close-price line.
///
/// Each bar centre is a quadratic control point and the curve passes through
/// the midpoints between neighbouring centres. Centres past the plot are
/// dropped.
pub(crate) fn draw(surface: &mut dyn DrawingSurface, frame: &SeriesFrame<'_>) -> ChartResult<()> {
    let plot_right = frame.layout.plot.right();
    let points: Vec<(f64, f64)> = frame
        .window
        .iter()
        .enumerate()
        .map(|(k, bar)| (frame.bar_center(k), frame.prices.price_to_y(bar.close)))
        .filter(|&(x, _)| x <= plot_right)
        .collect();
    if points.len() < 2 {
        return Ok(());
    }

    surface.begin_path();
    let (first_x, first_y) = points[0];
    surface.move_to(first_x, first_y);
    let (second_x, second_y) = points[1];
    surface.line_to((first_x + second_x) / 2.0, (first_y + second_y) / 2.0);
    for pair in points.windows(2).skip(1) {
        let (cx, cy) = pair[0];
        let (nx, ny) = pair[1];
        surface.quadratic_curve_to(cx, cy, (cx + nx) / 2.0, (cy + ny) / 2.0);
    }
    let (last_x, last_y) = points[points.len() - 1];
    surface.line_to(last_x, last_y);

    surface.set_stroke_color(frame.input.style.close_curve_color);
    surface.set_line_width(frame.input.style.close_curve_width);
    surface.stroke()
}
