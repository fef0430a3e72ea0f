use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, FontSpec, LinearGradient, TextBaseline, TextHAlign};

/// One call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Save,
    Restore,
    SetScale { sx: f64, sy: f64 },
    SetFillColor(Color),
    SetFillGradient(LinearGradient),
    SetStrokeColor(Color),
    SetLineWidth(f64),
    SetFont(FontSpec),
    SetTextAlign(TextHAlign),
    SetTextBaseline(TextBaseline),
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cx: f64, cy: f64, x: f64, y: f64 },
    Arc { cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64 },
    RoundedRect { x: f64, y: f64, width: f64, height: f64, radius: f64 },
    ClosePath,
    Fill,
    Stroke,
    FillText { text: String, x: f64, y: f64 },
}

/// Headless surface that records every call.
///
/// It still validates geometry so tests catch NaN/infinite coordinates and
/// unbalanced save/restore before a real backend sees them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    depth: usize,
    max_depth: usize,
    fill_color: Option<Color>,
    fill_stack: Vec<Option<Color>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.max_depth = self.depth;
    }

    /// Current save/restore nesting.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Solid fill color active at the current nesting level.
    #[must_use]
    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                SurfaceCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&SurfaceCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }

    fn push_checked(&mut self, command: SurfaceCommand, coords: &[f64]) -> ChartResult<()> {
        if coords.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "non-finite geometry in {command:?}"
            )));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) -> ChartResult<()> {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.fill_stack.push(self.fill_color);
        self.commands.push(SurfaceCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        if self.depth == 0 {
            return Err(ChartError::Surface(
                "restore without matching save".to_owned(),
            ));
        }
        self.depth -= 1;
        self.fill_color = self.fill_stack.pop().flatten();
        self.commands.push(SurfaceCommand::Restore);
        Ok(())
    }

    fn set_scale(&mut self, sx: f64, sy: f64) {
        self.commands.push(SurfaceCommand::SetScale { sx, sy });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = Some(color);
        self.commands.push(SurfaceCommand::SetFillColor(color));
    }

    fn set_fill_gradient(&mut self, gradient: &LinearGradient) {
        self.fill_color = None;
        self.commands
            .push(SurfaceCommand::SetFillGradient(gradient.clone()));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(SurfaceCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(SurfaceCommand::SetLineWidth(width));
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.commands.push(SurfaceCommand::SetFont(font.clone()));
    }

    fn set_text_align(&mut self, align: TextHAlign) {
        self.commands.push(SurfaceCommand::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(SurfaceCommand::SetTextBaseline(baseline));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.push_checked(
            SurfaceCommand::ClearRect {
                x,
                y,
                width,
                height,
            },
            &[x, y, width, height],
        )
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.push_checked(
            SurfaceCommand::FillRect {
                x,
                y,
                width,
                height,
            },
            &[x, y, width, height],
        )
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.push_checked(
            SurfaceCommand::StrokeRect {
                x,
                y,
                width,
                height,
            },
            &[x, y, width, height],
        )
    }

    fn begin_path(&mut self) {
        self.commands.push(SurfaceCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::LineTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.commands
            .push(SurfaceCommand::QuadraticCurveTo { cx, cy, x, y });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(SurfaceCommand::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        self.commands.push(SurfaceCommand::RoundedRect {
            x,
            y,
            width,
            height,
            radius,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(SurfaceCommand::ClosePath);
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.validate_open_path()?;
        self.commands.push(SurfaceCommand::Fill);
        Ok(())
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.validate_open_path()?;
        self.commands.push(SurfaceCommand::Stroke);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        if text.is_empty() {
            return Err(ChartError::InvalidData(
                "text must not be empty".to_owned(),
            ));
        }
        self.push_checked(
            SurfaceCommand::FillText {
                text: text.to_owned(),
                x,
                y,
            },
            &[x, y],
        )
    }
}

impl RecordingSurface {
    /// Path coordinates are recorded unchecked; validate them when the path
    /// is painted.
    fn validate_open_path(&self) -> ChartResult<()> {
        let path = self
            .commands
            .iter()
            .rev()
            .take_while(|command| !matches!(command, SurfaceCommand::BeginPath));
        for command in path {
            let finite = match *command {
                SurfaceCommand::MoveTo { x, y } | SurfaceCommand::LineTo { x, y } => {
                    x.is_finite() && y.is_finite()
                }
                SurfaceCommand::QuadraticCurveTo { cx, cy, x, y } => {
                    [cx, cy, x, y].iter().all(|v| v.is_finite())
                }
                SurfaceCommand::Arc {
                    cx,
                    cy,
                    radius,
                    start_angle,
                    end_angle,
                } => [cx, cy, radius, start_angle, end_angle]
                    .iter()
                    .all(|v| v.is_finite()),
                SurfaceCommand::RoundedRect {
                    x,
                    y,
                    width,
                    height,
                    radius,
                } => [x, y, width, height, radius].iter().all(|v| v.is_finite()),
                _ => true,
            };
            if !finite {
                return Err(ChartError::InvalidData(format!(
                    "non-finite path geometry in {command:?}"
                )));
            }
        }
        Ok(())
    }
}
