use std::fmt;

use tracing::info;

/// Lifecycle of a single run. Transitions only move forward, and `Done` is
/// reached even when every request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Planned,
    Dispatched,
    Joined,
    Reported,
    Done,
}

impl RunPhase {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            RunPhase::Planned => RunPhase::Dispatched,
            RunPhase::Dispatched => RunPhase::Joined,
            RunPhase::Joined => RunPhase::Reported,
            RunPhase::Reported | RunPhase::Done => RunPhase::Done,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunPhase::Planned => "planned",
            RunPhase::Dispatched => "dispatched",
            RunPhase::Joined => "joined",
            RunPhase::Reported => "reported",
            RunPhase::Done => "done",
        }
    }

    /// Moves to the following phase and logs the transition.
    pub fn advance(&mut self) {
        let next = self.next();
        if next != *self {
            info!(from = self.as_str(), to = next.as_str(), "run phase changed");
        }
        *self = next;
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
