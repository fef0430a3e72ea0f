use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-stats")]
use rayon::prelude::*;

use crate::core::Bar;

/// Fraction of the price span added above and below the visible extrema.
pub const RANGE_PADDING_RATIO: f64 = 0.05;
/// Padding used instead of a zero span.
pub const RANGE_EPSILON: f64 = 1e-6;

#[cfg(feature = "parallel-stats")]
const PARALLEL_SCAN_MIN_BARS: usize = 16_384;

/// Axis extents for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    pub min_price: f64,
    pub max_price: f64,
    pub max_volume: f64,
    /// Number of bars that actually contributed.
    pub bar_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Extrema {
    low: f64,
    high: f64,
    volume: u64,
}

impl Extrema {
    const EMPTY: Self = Self {
        low: f64::INFINITY,
        high: f64::NEG_INFINITY,
        volume: 0,
    };

    fn with_bar(self, bar: &Bar) -> Self {
        Self {
            low: self.low.min(bar.low),
            high: self.high.max(bar.high),
            volume: self.volume.max(bar.tick_volume),
        }
    }

    #[cfg_attr(not(feature = "parallel-stats"), allow(dead_code))]
    fn merge(self, other: Self) -> Self {
        Self {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
            volume: self.volume.max(other.volume),
        }
    }
}

/// Returns the bars of `[start, start + count)` that exist.
#[must_use]
pub fn visible_slice(bars: &[Bar], start: usize, count: usize) -> &[Bar] {
    let start = start.min(bars.len());
    let end = start.saturating_add(count).min(bars.len());
    &bars[start..end]
}

/// Price and volume extents of a window, padded for axis scaling.
///
/// An empty window yields the `[0, 1]` price range (padded) and a volume
/// maximum of `1`.
#[must_use]
pub fn compute_range_stats(bars: &[Bar], start: usize, count: usize) -> RangeStats {
    let window = visible_slice(bars, start, count);
    let extrema = scan(window);

    let (low, high) = if window.is_empty() {
        (0.0, 1.0)
    } else {
        (extrema.low, extrema.high)
    };
    let (min_price, max_price) = pad_range(low, high);

    let max_volume = if window.is_empty() || extrema.volume == 0 {
        1.0
    } else {
        extrema.volume as f64 * (1.0 + RANGE_PADDING_RATIO)
    };

    RangeStats {
        min_price,
        max_price,
        max_volume,
        bar_count: window.len(),
    }
}

/// Widens `[low, high]` by 5% of its span on both sides.
#[must_use]
pub fn pad_range(low: f64, high: f64) -> (f64, f64) {
    let span = high - low;
    let padding = if span > 0.0 && span.is_finite() {
        span * RANGE_PADDING_RATIO
    } else {
        RANGE_EPSILON
    };
    (low - padding, high + padding)
}

#[cfg(not(feature = "parallel-stats"))]
fn scan(window: &[Bar]) -> Extrema {
    window.iter().fold(Extrema::EMPTY, Extrema::with_bar)
}

#[cfg(feature = "parallel-stats")]
fn scan(window: &[Bar]) -> Extrema {
    if window.len() < PARALLEL_SCAN_MIN_BARS {
        return window.iter().fold(Extrema::EMPTY, Extrema::with_bar);
    }
    window
        .par_iter()
        .fold(|| Extrema::EMPTY, Extrema::with_bar)
        .reduce(|| Extrema::EMPTY, Extrema::merge)
}
