//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the controller's state machine (idle, running, draining, halted, done)
//! - `EndReason`: why a run stopped popping frontier items
//! - `PageOutcome`: the result of visiting one page

mod outcome;
mod phase;

pub use outcome::PageOutcome;
pub use phase::{CrawlPhase, EndReason};
