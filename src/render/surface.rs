use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{Color, FontSpec, LinearGradient, TextBaseline, TextHAlign};

/// Host 2D drawing surface, modelled on an immediate-mode canvas context.
///
/// Coordinates are logical pixels once [`DrawingSurface::set_scale`] has been
/// applied with the device-pixel ratio. Style setters affect subsequent
/// fills/strokes until the matching [`DrawingSurface::restore`].
pub trait DrawingSurface {
    /// Reacts to a host resize. Surfaces that own their backing store
    /// reallocate it here.
    fn resize(&mut self, _size: SurfaceSize) -> ChartResult<()> {
        Ok(())
    }

    fn save(&mut self) -> ChartResult<()>;
    fn restore(&mut self) -> ChartResult<()>;

    /// Replaces the current transform with a pure scale.
    fn set_scale(&mut self, sx: f64, sy: f64);

    fn set_fill_color(&mut self, color: Color);
    fn set_fill_gradient(&mut self, gradient: &LinearGradient);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &FontSpec);
    fn set_text_align(&mut self, align: TextHAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);
    fn close_path(&mut self);
    fn fill(&mut self) -> ChartResult<()>;
    fn stroke(&mut self) -> ChartResult<()>;

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;
}

/// Runs `draw` between `save` and `restore`, so styles set inside never leak.
///
/// `restore` runs even when `draw` fails; the draw error wins.
pub fn isolated<F>(surface: &mut dyn DrawingSurface, draw: F) -> ChartResult<()>
where
    F: FnOnce(&mut dyn DrawingSurface) -> ChartResult<()>,
{
    surface.save()?;
    let result = draw(surface);
    let restored = surface.restore();
    result.and(restored)
}
