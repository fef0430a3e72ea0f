use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::SurfaceSize;

/// One active touch contact in surface-relative logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

pub type TouchPoints = SmallVec<[TouchPoint; 2]>;

/// Host input translated into a plain message.
///
/// Coordinates are relative to the drawing surface, in logical pixels.
/// Timestamps are host milliseconds from any monotonic origin.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, time_ms: f64 },
    PointerMove { x: f64, y: f64, time_ms: f64 },
    PointerUp { x: f64, y: f64, time_ms: f64 },
    Wheel { x: f64, y: f64, delta_y: f64 },
    /// Touches currently on the surface after the start.
    TouchStart { touches: TouchPoints, time_ms: f64 },
    TouchMove { touches: TouchPoints, time_ms: f64 },
    /// Touches still on the surface after the end.
    TouchEnd { touches: TouchPoints, time_ms: f64 },
    DoubleClick { x: f64, y: f64 },
    Resize(SurfaceSize),
}

impl InputEvent {
    #[must_use]
    pub fn touch_start(x: f64, y: f64, time_ms: f64) -> Self {
        let mut touches = TouchPoints::new();
        touches.push(TouchPoint { x, y });
        Self::TouchStart { touches, time_ms }
    }

    #[must_use]
    pub fn touch_move(x: f64, y: f64, time_ms: f64) -> Self {
        let mut touches = TouchPoints::new();
        touches.push(TouchPoint { x, y });
        Self::TouchMove { touches, time_ms }
    }

    #[must_use]
    pub fn touch_end(time_ms: f64) -> Self {
        Self::TouchEnd {
            touches: TouchPoints::new(),
            time_ms,
        }
    }
}

/// What the host should do after dispatching an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventResponse {
    /// A new frame was armed; the host should schedule a frame callback.
    pub frame_armed: bool,
    /// The view changed (a redraw is pending, possibly already armed).
    pub redraw_requested: bool,
    /// The host should suppress the surface's native scroll/gesture handling.
    pub prevent_default: bool,
}
