use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::{BarRequest, BarSource, LoadEvent};

/// Runs `source.fetch` on a worker thread and streams its lifecycle as
/// [`LoadEvent`]s.
///
/// The receiver yields `Started`, any number of `Progress`, then exactly one
/// `Finished`. The UI thread drains it between frames, so bars are only ever
/// replaced on the thread that owns the engine.
pub fn spawn_fetch<B>(source: B, request: BarRequest) -> ChartResult<Receiver<LoadEvent>>
where
    B: BarSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("ohlcv-fetch".to_owned())
        .spawn(move || run_fetch(&source, &request, &tx))
        .map_err(|err| ChartError::Network(format!("failed to spawn fetch worker: {err}")))?;
    Ok(rx)
}

fn run_fetch<B: BarSource>(source: &B, request: &BarRequest, tx: &Sender<LoadEvent>) {
    // Send failures mean the receiver is gone; the load is simply abandoned.
    let _ = tx.send(LoadEvent::Started {
        message: format!("Loading {}", request.label()),
    });
    let result = source.fetch(request, &mut |progress| {
        let _ = tx.send(LoadEvent::Progress(progress));
    });
    debug!(ok = result.is_ok(), "fetch worker finished");
    let _ = tx.send(LoadEvent::Finished(result));
}
