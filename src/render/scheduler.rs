use serde::{Deserialize, Serialize};
use tracing::trace;

/// Handle for one armed display-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameToken(u64);

impl FrameToken {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Outcome of [`FrameScheduler::request_redraw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// A new frame was armed; the host must schedule a callback for it.
    Armed(FrameToken),
    /// A frame is already pending; nothing to schedule.
    AlreadyPending(FrameToken),
}

impl FrameRequest {
    #[must_use]
    pub fn token(self) -> FrameToken {
        match self {
            Self::Armed(token) | Self::AlreadyPending(token) => token,
        }
    }

    #[must_use]
    pub fn is_armed(self) -> bool {
        matches!(self, Self::Armed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub requested: u64,
    pub coalesced: u64,
    pub rendered: u64,
    pub stale: u64,
}

/// Coalesces redraw requests into at most one render per display frame.
///
/// Holds a single pending token; requests made while it is outstanding are
/// folded into it.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: Option<FrameToken>,
    next_id: u64,
    stats: SchedulerStats,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_redraw(&mut self) -> FrameRequest {
        self.stats.requested += 1;
        if let Some(token) = self.pending {
            self.stats.coalesced += 1;
            trace!(token = token.0, "redraw coalesced into pending frame");
            return FrameRequest::AlreadyPending(token);
        }
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending = Some(token);
        FrameRequest::Armed(token)
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the pending token at a frame boundary.
    ///
    /// Returns `true` when the caller should render. Stale or unknown tokens
    /// (e.g. after [`FrameScheduler::cancel`]) return `false`.
    pub fn begin_frame(&mut self, token: FrameToken) -> bool {
        if self.pending != Some(token) {
            self.stats.stale += 1;
            return false;
        }
        self.pending = None;
        self.stats.rendered += 1;
        true
    }

    /// Drops the pending frame, if any.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
