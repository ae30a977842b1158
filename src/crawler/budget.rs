use crate::config::CrawlerConfig;

/// Depth and page-count limits for one run, plus the pages-visited counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlBudget {
    pub max_depth: u32,
    pub max_pages: u32,
    pages_visited: u32,
}

impl CrawlBudget {
    pub fn new(max_depth: u32, max_pages: u32) -> Self {
        Self {
            max_depth,
            max_pages,
            pages_visited: 0,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.max_depth, config.max_pages)
    }

    /// Returns true if an item at `depth` may be processed
    pub fn allows_depth(&self, depth: u32) -> bool {
        depth <= self.max_depth
    }

    /// Returns true once `max_pages` pages have been visited
    pub fn is_exhausted(&self) -> bool {
        self.pages_visited >= self.max_pages
    }

    /// Counts one visit
    ///
    /// Callers check [`is_exhausted`](Self::is_exhausted) first; the count
    /// never passes `max_pages`.
    pub fn record_visit(&mut self) {
        debug_assert!(!self.is_exhausted(), "visit recorded past the page budget");
        self.pages_visited = (self.pages_visited + 1).min(self.max_pages);
    }

    pub fn pages_visited(&self) -> u32 {
        self.pages_visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_bound_is_inclusive() {
        let budget = CrawlBudget::new(2, 10);
        assert!(budget.allows_depth(1));
        assert!(budget.allows_depth(2));
        assert!(!budget.allows_depth(3));
    }

    #[test]
    fn test_pages_never_exceed_max() {
        let mut budget = CrawlBudget::new(2, 2);
        assert!(!budget.is_exhausted());

        budget.record_visit();
        assert_eq!(budget.pages_visited(), 1);
        assert!(!budget.is_exhausted());

        budget.record_visit();
        assert!(budget.is_exhausted());
        assert_eq!(budget.pages_visited(), 2);
    }

    #[test]
    #[should_panic(expected = "past the page budget")]
    #[cfg(debug_assertions)]
    fn test_visit_past_budget_is_a_bug() {
        let mut budget = CrawlBudget::new(2, 1);
        budget.record_visit();
        budget.record_visit();
    }

    #[test]
    fn test_from_config_defaults() {
        let budget = CrawlBudget::from_config(&CrawlerConfig::default());
        assert_eq!(budget.max_depth, 2);
        assert_eq!(budget.max_pages, 1000);
        assert_eq!(budget.pages_visited(), 0);
    }
}
