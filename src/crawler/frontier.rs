//! Crawl frontier
//!
//! A plain FIFO queue of (url, depth) pairs. Popping in insertion order is
//! what makes the traversal breadth-first: every page at depth `d` is
//! visited before any page at depth `d + 1`. The frontier does no
//! deduplication; that is the visited set's job.

use std::collections::VecDeque;
use url::Url;

/// A URL waiting to be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    /// Normalized absolute URL
    pub url: Url,

    /// Link distance from the seed; the seed is depth 1
    pub depth: u32,
}

impl FrontierItem {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }
}

/// FIFO work queue of pages awaiting a visit
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierItem>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item to the back of the queue
    pub fn push(&mut self, item: FrontierItem) {
        self.queue.push_back(item);
    }

    /// Removes the oldest item, or `None` when the queue is empty
    pub fn pop(&mut self) -> Option<FrontierItem> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drops every queued item and returns how many there were
    pub fn discard_remaining(&mut self) -> usize {
        let remaining = self.queue.len();
        self.queue.clear();
        remaining
    }
}
