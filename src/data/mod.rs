//! Bar acquisition boundary: requests, payload decoding, sources and
//! loading state.

mod decode;
#[cfg(feature = "http-source")]
mod http;
mod loading;
mod worker;

pub use decode::{PayloadShape, decode_bars, decode_bars_slice, decode_bars_value, detect_shape};
#[cfg(feature = "http-source")]
pub use http::{HttpBarSource, HttpSourceConfig};
pub use loading::{LoadEvent, LoadProgress, LoadingState};
pub use worker::spawn_fetch;

use chrono::{DateTime, Utc};

use crate::core::Bar;
use crate::error::ChartResult;

/// Parameters for one historical bar download.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRequest {
    pub broker: String,
    pub symbol: String,
    pub timeframe: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Asks the server for the compact (chunked) encoding.
    pub use_compact_encoding: bool,
    /// Overrides the source's default endpoint.
    pub endpoint_url: Option<String>,
}

impl BarRequest {
    #[must_use]
    pub fn new(
        broker: impl Into<String>,
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            broker: broker.into(),
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            start,
            end,
            use_compact_encoding: false,
            endpoint_url: None,
        }
    }

    #[must_use]
    pub fn with_compact_encoding(mut self, enabled: bool) -> Self {
        self.use_compact_encoding = enabled;
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Query pairs sent to the bar endpoint.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("broker", self.broker.clone()),
            ("symbol", self.symbol.clone()),
            ("timeframe", self.timeframe.clone()),
            ("start", self.start.to_rfc3339()),
            ("end", self.end.to_rfc3339()),
        ];
        if self.use_compact_encoding {
            pairs.push(("compact", "1".to_owned()));
        }
        pairs
    }

    /// Short human label used for loading messages.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} {}", self.broker, self.symbol, self.timeframe)
    }
}

/// Produces a time-ascending bar array for a request.
///
/// Implementations report progress through `progress` as they go and fail
/// with `ChartError::Network` or `ChartError::Format`.
pub trait BarSource {
    fn fetch(
        &self,
        request: &BarRequest,
        progress: &mut dyn FnMut(LoadProgress),
    ) -> ChartResult<Vec<Bar>>;
}

/// Source backed by an in-memory JSON payload.
///
/// Handy for fixtures, replays and hosts that fetch bytes themselves.
#[derive(Debug, Clone)]
pub struct JsonPayloadSource {
    payload: String,
}

impl JsonPayloadSource {
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl BarSource for JsonPayloadSource {
    fn fetch(
        &self,
        request: &BarRequest,
        progress: &mut dyn FnMut(LoadProgress),
    ) -> ChartResult<Vec<Bar>> {
        progress(LoadProgress::new(50.0, format!("Decoding {}", request.label())));
        let bars = decode_bars(&self.payload)?;
        progress(LoadProgress::new(100.0, format!("Loaded {} bars", bars.len())));
        Ok(bars)
    }
}
