use std::collections::HashSet;
use url::Url;

/// URLs already taken off the frontier in this run
///
/// Keys are normalized absolute URLs, so links that resolve to the same page
/// through different relative paths collapse to one entry. The set only
/// grows; there is no removal.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    /// Marks `url` as visited; returns false if it already was
    ///
    /// Check and insert are a single step, so the caller can use the return
    /// value as the "is this novel" decision.
    pub fn add(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
