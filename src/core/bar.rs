use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One OHLC candle plus tick volume for a fixed interval.
///
/// Working arrays are sorted ascending by `time`. Duplicated timestamps are
/// kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Interval open time in unix seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(rename = "tickVolume")]
    pub tick_volume: u64,
}

impl Bar {
    /// Builds a bar, rejecting non-finite prices.
    pub fn new(
        time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        tick_volume: u64,
    ) -> ChartResult<Self> {
        let bar = Self {
            time,
            open,
            high,
            low,
            close,
            tick_volume,
        };
        bar.validate()?;
        Ok(bar)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar {field} must be finite (time={})",
                    self.time
                )));
            }
        }
        Ok(())
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Parses a quoted decimal price such as `"27123.45"` or `"1.5e-3"`.
///
/// Text that is not a decimal number is a `Format` error; a decimal with no
/// finite `f64` counterpart is `InvalidData`.
pub fn parse_decimal_price(text: &str, field_name: &str) -> ChartResult<f64> {
    let trimmed = text.trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| {
            ChartError::Format(format!("{field_name} is not a decimal number ({text:?}): {e}"))
        })?;
    decimal_to_f64(value, field_name)
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value
        .to_f64()
        .filter(|price| price.is_finite())
        .ok_or_else(|| {
            ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
        })
}

/// Stable sort by `time`; equal timestamps keep their relative order.
pub fn sort_bars_by_time(bars: &mut [Bar]) {
    bars.sort_by_key(|bar| bar.time);
}
