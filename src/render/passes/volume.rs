use crate::core::PixelRect;
use crate::error::ChartResult;
use crate::render::pipeline::SeriesFrame;
use crate::render::surface::DrawingSurface;

/// Volume histogram anchored to the bottom of `band`.
pub(crate) fn draw(
    surface: &mut dyn DrawingSurface,
    frame: &SeriesFrame<'_>,
    band: PixelRect,
) -> ChartResult<usize> {
    let style = frame.input.style;
    let max_volume = frame.stats.max_volume;
    let mut drawn = 0;

    for (k, bar) in frame.window.iter().enumerate() {
        let left = frame.bar_left(k);
        if !frame.overlaps_plot(left) || bar.tick_volume == 0 {
            continue;
        }
        let height = (bar.tick_volume as f64 / max_volume).min(1.0) * band.height;
        surface.set_fill_color(if bar.is_bullish() {
            style.volume_up_color
        } else {
            style.volume_down_color
        });
        surface.fill_rect(left, band.bottom() - height, frame.clipped_width(left), height)?;
        drawn += 1;
    }
    Ok(drawn)
}
