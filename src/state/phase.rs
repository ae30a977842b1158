//! Crawl controller phases
//!
//! A run moves `Idle -> Running -> (Draining | Halted) -> Done` and never
//! goes back.

use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Frontier holds only the seed; nothing has been fetched
    Idle,

    /// Popping and processing frontier items
    Running,

    /// Frontier ran empty before the page budget was used up
    Draining,

    /// Page budget exhausted or the run was stopped; remaining items are dropped
    Halted,

    /// Run finished
    Done,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Running, Self::Halted)
                | (Self::Draining, Self::Done)
                | (Self::Halted, Self::Done)
        )
    }

    /// Returns true once the run has finished
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Halted => "halted",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a run stopped popping frontier items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// Every reachable, permitted page within the depth bound was visited
    FrontierExhausted,

    /// `max-pages` pages were fetched
    PageBudgetReached,

    /// The run was cancelled through its stop handle
    Stopped,
}

impl EndReason {
    /// The phase the controller enters for this reason
    pub fn phase(self) -> CrawlPhase {
        match self {
            Self::FrontierExhausted => CrawlPhase::Draining,
            Self::PageBudgetReached | Self::Stopped => CrawlPhase::Halted,
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::PageBudgetReached => "page budget reached",
            Self::Stopped => "stopped",
        };
        f.write_str(text)
    }
}
