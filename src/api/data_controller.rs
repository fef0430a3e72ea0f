use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::{debug, warn};

use crate::core::{Bar, sort_bars_by_time};
use crate::data::{BarRequest, BarSource, LoadEvent, LoadProgress};
use crate::error::{ChartError, ChartResult};
use crate::render::DrawingSurface;

use super::ChartEngine;

impl<S: DrawingSurface> ChartEngine<S> {
    /// Replaces the whole bar array and scrolls to the newest bars.
    ///
    /// Bars are stable-sorted by time; duplicates are kept. The bar width is
    /// preserved and any momentum is cancelled. Fails without touching the current data when any bar has a
    /// non-finite price.
    pub fn set_bars(&mut self, mut bars: Vec<Bar>) -> ChartResult<()> {
        for bar in &bars {
            bar.validate()?;
        }
        sort_bars_by_time(&mut bars);

        self.bars = bars;
        self.viewport.set_total_bars(self.bars.len());
        self.gestures.stop_momentum();
        self.viewport.reset_to_latest(self.viewport.bar_width());
        self.request_redraw();
        debug!(
            count = self.bars.len(),
            offset_index = self.viewport.offset_index(),
            "bars replaced"
        );
        Ok(())
    }

    /// Shows the loading overlay with `message` and zero progress.
    pub fn begin_load(&mut self, message: impl Into<String>) {
        self.loading.start(message);
        self.request_redraw();
        debug!(message = %self.loading.message, "load started");
    }

    pub fn apply_load_progress(&mut self, progress: LoadProgress) {
        self.loading.apply(progress);
        self.request_redraw();
    }

    /// Completes a load. On success the bars are replaced; on failure the
    /// previous bars stay and the error is returned. The overlay is cleared
    /// either way.
    pub fn finish_load(&mut self, result: ChartResult<Vec<Bar>>) -> ChartResult<()> {
        self.loading.finish();
        self.request_redraw();
        match result {
            Ok(bars) => {
                self.set_bars(bars)?;
                debug!(count = self.bars.len(), "load finished");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, kept = self.bars.len(), "load failed");
                Err(err)
            }
        }
    }

    pub fn handle_load_event(&mut self, event: LoadEvent) -> ChartResult<()> {
        match event {
            LoadEvent::Started { message } => {
                self.begin_load(message);
                Ok(())
            }
            LoadEvent::Progress(progress) => {
                self.apply_load_progress(progress);
                Ok(())
            }
            LoadEvent::Finished(result) => self.finish_load(result),
        }
    }

    /// Applies every event already queued on `events` without blocking.
    ///
    /// Returns `Ok(true)` once the load has finished. A worker that hangs up
    /// before sending `Finished` fails the load with `ChartError::Network`.
    pub fn drain_load_events(&mut self, events: &Receiver<LoadEvent>) -> ChartResult<bool> {
        loop {
            match events.try_recv() {
                Ok(LoadEvent::Finished(result)) => {
                    self.finish_load(result)?;
                    return Ok(true);
                }
                Ok(event) => self.handle_load_event(event)?,
                Err(TryRecvError::Empty) => return Ok(false),
                Err(TryRecvError::Disconnected) => {
                    if !self.loading.is_loading {
                        return Ok(true);
                    }
                    self.finish_load(Err(ChartError::Network(
                        "bar source stopped without a result".to_owned(),
                    )))?;
                    return Ok(true);
                }
            }
        }
    }

    /// Fetches bars synchronously from `source`, driving the loading state
    /// through the same events an asynchronous load would produce.
    pub fn load_from<B>(&mut self, source: &B, request: &BarRequest) -> ChartResult<()>
    where
        B: BarSource + ?Sized,
    {
        self.handle_load_event(LoadEvent::Started {
            message: format!("Loading {}", request.label()),
        })?;
        let result = source.fetch(request, &mut |progress| self.apply_load_progress(progress));
        self.handle_load_event(LoadEvent::Finished(result))
    }
}
