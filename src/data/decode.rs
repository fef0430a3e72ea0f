use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::{Bar, parse_decimal_price, sort_bars_by_time};
use crate::error::{ChartError, ChartResult};

/// One chunk of the legacy payload; bar times are relative to `chunkStart`.
#[derive(Debug, Deserialize)]
struct LegacyChunk {
    #[serde(rename = "chunkStart")]
    chunk_start: i64,
    #[serde(default)]
    bars: Option<Vec<LegacyBar>>,
}

#[derive(Debug, Deserialize)]
struct LegacyBar {
    time: i64,
    #[serde(default)]
    open: Option<WirePrice>,
    #[serde(default)]
    high: Option<WirePrice>,
    #[serde(default)]
    low: Option<WirePrice>,
    #[serde(default)]
    close: Option<WirePrice>,
    #[serde(rename = "tickVolume")]
    tick_volume: u64,
}

#[derive(Debug, Deserialize)]
struct FlatBar {
    time: i64,
    open: WirePrice,
    high: WirePrice,
    low: WirePrice,
    close: WirePrice,
    #[serde(rename = "tickVolume")]
    tick_volume: u64,
}

/// Prices arrive either as json numbers or as quoted decimals.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(f64),
    Text(String),
}

impl WirePrice {
    fn to_f64(&self, field_name: &str) -> ChartResult<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => parse_decimal_price(text, field_name),
        }
    }
}

fn optional_price(price: Option<&WirePrice>, field_name: &str) -> ChartResult<f64> {
    price.map_or(Ok(0.0), |price| price.to_f64(field_name))
}

/// Shape detected in a bar payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Flat,
    LegacyChunked,
}

/// Decodes a JSON bar payload into a time-ascending bar array.
pub fn decode_bars(payload: &str) -> ChartResult<Vec<Bar>> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| ChartError::Format(format!("payload is not valid json: {e}")))?;
    decode_bars_value(value)
}

pub fn decode_bars_slice(payload: &[u8]) -> ChartResult<Vec<Bar>> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| ChartError::Format(format!("payload is not valid json: {e}")))?;
    decode_bars_value(value)
}

/// Accepts either a flat array of bars or the legacy chunked array.
///
/// Chunked bars get absolute times (`chunkStart + time`) and missing prices
/// default to `0`. Prices may be json numbers or quoted decimals. Chunks
/// without bars are skipped. The result is stably sorted by time; duplicates
/// are kept.
pub fn decode_bars_value(value: Value) -> ChartResult<Vec<Bar>> {
    let shape = detect_shape(&value)?;
    let mut bars = match shape {
        PayloadShape::Flat => {
            let raw = serde_json::from_value::<Vec<FlatBar>>(value)
                .map_err(|e| ChartError::Format(format!("invalid flat bar array: {e}")))?;
            raw.iter().map(flat_bar).collect::<ChartResult<Vec<_>>>()?
        }
        PayloadShape::LegacyChunked => {
            let chunks = serde_json::from_value::<Vec<LegacyChunk>>(value)
                .map_err(|e| ChartError::Format(format!("invalid chunked bar array: {e}")))?;
            expand_chunks(chunks)?
        }
    };
    sort_bars_by_time(&mut bars);
    debug!(?shape, bar_count = bars.len(), "decoded bar payload");
    Ok(bars)
}

/// Classifies the payload by its first element. Empty arrays are flat.
pub fn detect_shape(value: &Value) -> ChartResult<PayloadShape> {
    let Some(items) = value.as_array() else {
        return Err(ChartError::Format(
            "expected a json array of bars or chunks".to_owned(),
        ));
    };
    match items.first() {
        None => Ok(PayloadShape::Flat),
        Some(Value::Object(first)) if first.contains_key("chunkStart") => {
            Ok(PayloadShape::LegacyChunked)
        }
        Some(Value::Object(first)) if first.contains_key("time") => Ok(PayloadShape::Flat),
        Some(other) => Err(ChartError::Format(format!(
            "unrecognized bar payload element: {}",
            describe(other)
        ))),
    }
}

fn expand_chunks(chunks: Vec<LegacyChunk>) -> ChartResult<Vec<Bar>> {
    let total = chunks
        .iter()
        .map(|chunk| chunk.bars.as_ref().map_or(0, Vec::len))
        .sum();
    let mut out = Vec::with_capacity(total);
    for chunk in chunks {
        let Some(bars) = chunk.bars else {
            continue;
        };
        for raw in bars {
            let time = chunk.chunk_start.checked_add(raw.time).ok_or_else(|| {
                ChartError::Format(format!(
                    "chunk time overflow: {} + {}",
                    chunk.chunk_start, raw.time
                ))
            })?;
            out.push(Bar {
                time,
                open: optional_price(raw.open.as_ref(), "open")?,
                high: optional_price(raw.high.as_ref(), "high")?,
                low: optional_price(raw.low.as_ref(), "low")?,
                close: optional_price(raw.close.as_ref(), "close")?,
                tick_volume: raw.tick_volume,
            });
        }
    }
    Ok(out)
}

fn flat_bar(raw: &FlatBar) -> ChartResult<Bar> {
    Ok(Bar {
        time: raw.time,
        open: raw.open.to_f64("open")?,
        high: raw.high.to_f64("high")?,
        low: raw.low.to_f64("low")?,
        close: raw.close.to_f64("close")?,
        tick_volume: raw.tick_volume,
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without `time` or `chunkStart`",
    }
}
