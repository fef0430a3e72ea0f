use crate::error::ChartResult;
use crate::render::pipeline::FrameInput;
use crate::render::style::FrameLayout;
use crate::render::surface::DrawingSurface;

pub(crate) fn draw(
    surface: &mut dyn DrawingSurface,
    input: &FrameInput<'_>,
    layout: &FrameLayout,
) -> ChartResult<()> {
    let area = layout.surface;
    surface.clear_rect(area.x, area.y, area.width, area.height)?;
    surface.set_fill_color(input.style.background_color);
    surface.fill_rect(area.x, area.y, area.width, area.height)
}
