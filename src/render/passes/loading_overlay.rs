use std::f64::consts::{PI, TAU};

use crate::core::PixelRect;
use crate::error::ChartResult;
use crate::render::pipeline::FrameInput;
use crate::render::style::FrameLayout;
use crate::render::surface::DrawingSurface;
use crate::render::{LinearGradient, TextBaseline, TextHAlign};

const PANEL_MAX_WIDTH: f64 = 320.0;
const PANEL_HEIGHT: f64 = 128.0;
const PANEL_RADIUS: f64 = 12.0;
const PANEL_INSET: f64 = 20.0;
const BAR_HEIGHT: f64 = 8.0;
const SPINNER_RADIUS: f64 = 10.0;
/// Spinner revolutions per second.
const SPINNER_SPEED: f64 = 1.2;

/// Centered modal panel shown while bars are loading.
pub(crate) fn draw(
    surface: &mut dyn DrawingSurface,
    input: &FrameInput<'_>,
    layout: &FrameLayout,
) -> ChartResult<()> {
    let style = input.style;
    let area = layout.surface;
    let loading = input.loading;

    surface.set_fill_color(style.overlay_backdrop_color);
    surface.fill_rect(area.x, area.y, area.width, area.height)?;

    let panel = panel_rect(area);
    surface.begin_path();
    surface.rounded_rect(panel.x, panel.y, panel.width, panel.height, PANEL_RADIUS);
    surface.set_fill_color(style.overlay_panel_color);
    surface.fill()?;
    surface.set_stroke_color(style.overlay_border_color);
    surface.set_line_width(1.0);
    surface.stroke()?;

    // Spinner: a 3/4 arc whose start angle follows wall-clock time.
    let spinner_x = panel.x + PANEL_INSET + SPINNER_RADIUS;
    let spinner_y = panel.y + PANEL_INSET + SPINNER_RADIUS;
    let start_angle = spinner_angle(input.now_ms);
    surface.begin_path();
    surface.arc(
        spinner_x,
        spinner_y,
        SPINNER_RADIUS,
        start_angle,
        start_angle + 1.5 * PI,
    );
    surface.set_stroke_color(style.spinner_color);
    surface.set_line_width(3.0);
    surface.stroke()?;

    surface.set_font(&style.overlay_font);
    surface.set_fill_color(style.overlay_text_color);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.set_text_align(TextHAlign::Left);
    let message = if loading.message.is_empty() {
        "Loading"
    } else {
        loading.message.as_str()
    };
    surface.fill_text(
        message,
        spinner_x + SPINNER_RADIUS + 12.0,
        spinner_y,
    )?;

    let progress = if loading.progress.is_finite() {
        loading.progress.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let track = PixelRect::new(
        panel.x + PANEL_INSET,
        panel.y + panel.height - PANEL_INSET - BAR_HEIGHT - 22.0,
        panel.width - 2.0 * PANEL_INSET,
        BAR_HEIGHT,
    );
    surface.begin_path();
    surface.rounded_rect(track.x, track.y, track.width, track.height, BAR_HEIGHT / 2.0);
    surface.set_fill_color(style.progress_track_color);
    surface.fill()?;

    let filled = track.width * progress / 100.0;
    if filled > 0.0 {
        let gradient = LinearGradient::new(track.x, track.y, track.right(), track.y)
            .with_stop(0.0, style.progress_start_color)
            .with_stop(1.0, style.progress_end_color);
        surface.begin_path();
        surface.rounded_rect(
            track.x,
            track.y,
            filled,
            track.height,
            (BAR_HEIGHT / 2.0).min(filled / 2.0),
        );
        surface.set_fill_gradient(&gradient);
        surface.fill()?;
    }

    surface.set_fill_color(style.overlay_text_color);
    surface.set_text_align(TextHAlign::Center);
    surface.set_text_baseline(TextBaseline::Top);
    surface.fill_text(
        &format!("{progress:.0}%"),
        track.x + track.width / 2.0,
        track.bottom() + 8.0,
    )
}

fn panel_rect(area: PixelRect) -> PixelRect {
    let width = PANEL_MAX_WIDTH.min((area.width - 2.0 * PANEL_INSET).max(PANEL_INSET * 4.0));
    let (cx, cy) = area.center();
    PixelRect::new(cx - width / 2.0, cy - PANEL_HEIGHT / 2.0, width, PANEL_HEIGHT)
}

fn spinner_angle(now_ms: f64) -> f64 {
    if !now_ms.is_finite() {
        return 0.0;
    }
    (now_ms / 1000.0 * SPINNER_SPEED * TAU).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_turns_with_time() {
        assert_eq!(spinner_angle(0.0), 0.0);
        assert!(spinner_angle(100.0) > 0.0);
        assert!(spinner_angle(1e12) < TAU);
    }
}
