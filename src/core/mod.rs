pub mod bar;
pub mod labels;
pub mod range;
pub mod scale;
pub mod types;
pub mod viewport;

pub use bar::{Bar, decimal_to_f64, parse_decimal_price, sort_bars_by_time};
pub use labels::{format_bar_time, format_price, format_volume};
pub use range::{
    RANGE_EPSILON, RANGE_PADDING_RATIO, RangeStats, compute_range_stats, pad_range, visible_slice,
};
pub use scale::{MIN_PRICE_SPAN, PriceMapper};
pub use types::{PixelRect, SurfaceSize};
pub use viewport::{MIN_BAR_WIDTH, Viewport, ViewportConfig, VisibleWindow};
