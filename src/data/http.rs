use std::io::Read;
use std::time::Duration;

use tracing::debug;

use super::{BarRequest, BarSource, LoadProgress, decode_bars_slice};
use crate::core::Bar;
use crate::error::{ChartError, ChartResult};

const READ_CHUNK_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpSourceConfig {
    /// Used when the request carries no `endpoint_url`.
    pub default_endpoint: String,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            default_endpoint: "http://127.0.0.1:8080/api/bars".to_owned(),
            timeout: None,
        }
    }
}

/// Blocking HTTP bar source.
///
/// Streams the body and reports download progress when the server sends a
/// `Content-Length`.
#[derive(Debug, Clone)]
pub struct HttpBarSource {
    client: reqwest::blocking::Client,
    config: HttpSourceConfig,
}

impl HttpBarSource {
    pub fn new(config: HttpSourceConfig) -> ChartResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChartError::Network(format!("http client error: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint<'a>(&'a self, request: &'a BarRequest) -> &'a str {
        request
            .endpoint_url
            .as_deref()
            .unwrap_or(&self.config.default_endpoint)
    }
}

impl BarSource for HttpBarSource {
    fn fetch(
        &self,
        request: &BarRequest,
        progress: &mut dyn FnMut(LoadProgress),
    ) -> ChartResult<Vec<Bar>> {
        let url = self.endpoint(request);
        debug!(url, symbol = %request.symbol, "requesting bars");
        progress(LoadProgress::new(0.0, format!("Requesting {}", request.label())));

        let mut response = self
            .client
            .get(url)
            .query(&request.query_pairs())
            .send()
            .map_err(|e| ChartError::Network(format!("bar request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Network(format!(
                "bar endpoint answered {status}"
            )));
        }

        let total = response.content_length();
        let mut body = Vec::with_capacity(total.unwrap_or(0) as usize);
        let mut buffer = vec![0_u8; READ_CHUNK_BYTES];
        loop {
            let read = response
                .read(&mut buffer)
                .map_err(|e| ChartError::Network(format!("bar download failed: {e}")))?;
            if read == 0 {
                break;
            }
            body.extend_from_slice(&buffer[..read]);
            if let Some(total) = total.filter(|total| *total > 0) {
                // Keep the last percent for decoding.
                let percent = (body.len() as f64 / total as f64 * 100.0).min(99.0);
                progress(LoadProgress::new(
                    percent,
                    format!("Downloading {}", request.label()),
                ));
            }
        }

        progress(LoadProgress::new(99.0, "Decoding bars"));
        let bars = decode_bars_slice(&body)?;
        progress(LoadProgress::new(100.0, format!("Loaded {} bars", bars.len())));
        Ok(bars)
    }
}
