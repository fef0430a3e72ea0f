use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingSurface, FontSpec, LinearGradient, TextBaseline, TextHAlign,
};

#[derive(Debug, Clone)]
enum FillSource {
    Solid(Color),
    Gradient(LinearGradient),
}

/// Canvas-like state that cairo does not track itself.
#[derive(Debug, Clone)]
struct CanvasState {
    fill: FillSource,
    stroke: Color,
    font: FontSpec,
    align: TextHAlign,
    baseline: TextBaseline,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            fill: FillSource::Solid(Color::rgb(0.0, 0.0, 0.0)),
            stroke: Color::rgb(0.0, 0.0, 0.0),
            font: FontSpec::new("Sans", 10.0),
            align: TextHAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// [`DrawingSurface`] over a Cairo context, with Pango text.
///
/// Works either on an external context (for example a GTK draw callback) or
/// on an owned offscreen image sized in physical pixels. Paths follow canvas
/// semantics: `fill`/`stroke` keep the current path until `begin_path`.
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    state: CanvasState,
    stack: Vec<CanvasState>,
}

impl CairoSurface {
    #[must_use]
    pub fn for_context(context: Context) -> Self {
        Self {
            context,
            image: None,
            state: CanvasState::default(),
            stack: Vec::new(),
        }
    }

    /// Creates an owned offscreen image matching `size` in physical pixels.
    pub fn offscreen(size: SurfaceSize) -> ChartResult<Self> {
        let (image, context) = create_image(size)?;
        Ok(Self {
            context,
            image: Some(image),
            state: CanvasState::default(),
            stack: Vec::new(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    /// Blits the offscreen image onto a logical-pixel target context.
    pub fn paint_onto(&self, target: &Context, device_pixel_ratio: f64) -> ChartResult<()> {
        let Some(image) = &self.image else {
            return Ok(());
        };
        image.flush();
        target
            .save()
            .map_err(|err| map_backend_error("failed to save target", err))?;
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            target.scale(1.0 / device_pixel_ratio, 1.0 / device_pixel_ratio);
        }
        let painted = target
            .set_source_surface(image, 0.0, 0.0)
            .and_then(|()| target.paint())
            .map_err(|err| map_backend_error("failed to paint offscreen image", err));
        target
            .restore()
            .map_err(|err| map_backend_error("failed to restore target", err))?;
        painted
    }

    fn apply_color(&self, color: Color) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }

    fn apply_fill(&self) -> ChartResult<()> {
        match &self.state.fill {
            FillSource::Solid(color) => {
                self.apply_color(*color);
                Ok(())
            }
            FillSource::Gradient(gradient) => {
                let pattern =
                    cairo::LinearGradient::new(gradient.x0, gradient.y0, gradient.x1, gradient.y1);
                for stop in &gradient.stops {
                    pattern.add_color_stop_rgba(
                        stop.offset,
                        stop.color.red,
                        stop.color.green,
                        stop.color.blue,
                        stop.color.alpha,
                    );
                }
                self.context
                    .set_source(&pattern)
                    .map_err(|err| map_backend_error("failed to set gradient", err))
            }
        }
    }
}

impl DrawingSurface for CairoSurface {
    fn resize(&mut self, size: SurfaceSize) -> ChartResult<()> {
        if self.image.is_none() {
            return Ok(());
        }
        let (image, context) = create_image(size)?;
        self.image = Some(image);
        self.context = context;
        self.state = CanvasState::default();
        self.stack.clear();
        Ok(())
    }

    fn save(&mut self) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))?;
        self.stack.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        let Some(state) = self.stack.pop() else {
            return Err(ChartError::Surface(
                "restore without matching save".to_owned(),
            ));
        };
        self.state = state;
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))
    }

    fn set_scale(&mut self, sx: f64, sy: f64) {
        self.context.identity_matrix();
        self.context.scale(sx, sy);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = FillSource::Solid(color);
    }

    fn set_fill_gradient(&mut self, gradient: &LinearGradient) {
        self.state.fill = FillSource::Gradient(gradient.clone());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextHAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let context = &self.context;
        context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))?;
        context.set_operator(Operator::Clear);
        context.new_path();
        context.rectangle(x, y, width, height);
        let cleared = context
            .fill()
            .map_err(|err| map_backend_error("failed to clear rectangle", err));
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))?;
        cleared
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.apply_fill()?;
        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.apply_color(self.state.stroke);
        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle", err))
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        // Cairo only has cubic curves: elevate the quadratic segment.
        let (x0, y0) = self.context.current_point().unwrap_or((cx, cy));
        self.context.curve_to(
            x0 + 2.0 / 3.0 * (cx - x0),
            y0 + 2.0 / 3.0 * (cy - y0),
            x + 2.0 / 3.0 * (cx - x),
            y + 2.0 / 3.0 * (cy - y),
            x,
            y,
        );
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.arc(cx, cy, radius, start_angle, end_angle);
    }

    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let context = &self.context;
        let radius = radius.max(0.0).min(width * 0.5).min(height * 0.5);
        if radius <= 0.0 {
            context.rectangle(x, y, width, height);
            return;
        }

        let right = x + width;
        let bottom = y + height;
        context.new_sub_path();
        context.arc(right - radius, y + radius, radius, -FRAC_PI_2, 0.0);
        context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
        context.arc(x + radius, bottom - radius, radius, FRAC_PI_2, PI);
        context.arc(x + radius, y + radius, radius, PI, PI + FRAC_PI_2);
        context.close_path();
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.apply_fill()?;
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.apply_color(self.state.stroke);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut font_description = FontDescription::new();
        font_description.set_family(&self.state.font.family);
        font_description.set_absolute_size(self.state.font.size_px * f64::from(pango::SCALE));
        if self.state.font.bold {
            font_description.set_weight(pango::Weight::Bold);
        }
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        let (text_width, text_height) = layout.pixel_size();
        let left = match self.state.align {
            TextHAlign::Left => x,
            TextHAlign::Center => x - f64::from(text_width) / 2.0,
            TextHAlign::Right => x - f64::from(text_width),
        };
        let top = match self.state.baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - f64::from(text_height) / 2.0,
            TextBaseline::Bottom => y - f64::from(text_height),
            TextBaseline::Alphabetic => y - f64::from(layout.baseline()) / f64::from(pango::SCALE),
        };

        self.apply_fill()?;
        self.context.new_path();
        self.context.move_to(left, top);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        Ok(())
    }
}

fn create_image(size: SurfaceSize) -> ChartResult<(ImageSurface, Context)> {
    if !size.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: size.width,
            height: size.height,
        });
    }
    let (width, height) = size.physical_size();
    let image = ImageSurface::create(Format::ARgb32, width.max(1) as i32, height.max(1) as i32)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
    let context = Context::new(&image)
        .map_err(|err| map_backend_error("failed to create cairo context", err))?;
    Ok((image, context))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Surface(format!("{prefix}: {err}"))
}
