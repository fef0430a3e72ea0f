//! Draw passes, in pipeline order. Each pass only sees the frame inputs and
//! runs inside its own save/restore scope.

pub(crate) mod background;
pub(crate) mod candles;
pub(crate) mod close_curve;
pub(crate) mod loading_overlay;
pub(crate) mod price_scale;
pub(crate) mod time_axis;
pub(crate) mod volume;
