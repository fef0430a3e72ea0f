use serde::{Deserialize, Serialize};

use crate::core::Bar;
use crate::error::ChartResult;

/// Incremental progress reported by a bar source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadProgress {
    /// Completion in `[0, 100]`.
    pub percent: f64,
    pub message: String,
}

impl LoadProgress {
    #[must_use]
    pub fn new(percent: f64, message: impl Into<String>) -> Self {
        Self {
            percent,
            message: message.into(),
        }
    }
}

/// Loading overlay state consumed by the render pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadingState {
    pub is_loading: bool,
    pub progress: f64,
    pub message: String,
}

impl LoadingState {
    pub fn start(&mut self, message: impl Into<String>) {
        self.is_loading = true;
        self.progress = 0.0;
        self.message = message.into();
    }

    /// Applies a progress report. Non-finite percentages keep the previous
    /// value; others are clamped into `[0, 100]`.
    pub fn apply(&mut self, progress: LoadProgress) {
        if progress.percent.is_finite() {
            self.progress = progress.percent.clamp(0.0, 100.0);
        }
        if !progress.message.is_empty() {
            self.message = progress.message;
        }
    }

    pub fn finish(&mut self) {
        self.is_loading = false;
        self.progress = 100.0;
    }
}

/// Messages driving the engine's loading orchestration.
#[derive(Debug)]
pub enum LoadEvent {
    Started { message: String },
    Progress(LoadProgress),
    Finished(ChartResult<Vec<Bar>>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        let mut state = LoadingState::default();
        state.start("loading");
        state.apply(LoadProgress::new(140.0, ""));
        assert_eq!(state.progress, 100.0);
        assert_eq!(state.message, "loading");
        state.apply(LoadProgress::new(f64::NAN, "decoding"));
        assert_eq!(state.progress, 100.0);
        assert_eq!(state.message, "decoding");
    }
}
