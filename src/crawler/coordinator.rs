//! Crawl controller - the breadth-first traversal loop
//!
//! This module owns one crawl run:
//! - Seeding the frontier and gate-checking the seed
//! - Popping items in FIFO order and enforcing depth and page budgets
//! - Skipping already-visited URLs
//! - Fetching pages, following redirects, and isolating per-page failures
//! - Normalizing discovered links and queueing the novel, permitted ones

use crate::config::Config;
use crate::crawler::budget::CrawlBudget;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::frontier::{Frontier, FrontierItem};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::visited::VisitedSet;
use crate::output::{CrawlReport, VisitRecord};
use crate::robots::RobotsGate;
use crate::state::{CrawlPhase, EndReason, PageOutcome};
use crate::url::resolve_link;
use crate::{CrawlError, FetchError};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Redirect hops followed for one frontier item
const MAX_REDIRECTS: usize = 10;

/// Main crawl controller
///
/// All run state (frontier, visited set, budget, robots cache) lives here
/// and is dropped with the controller, so one `Crawler` is one run.
pub struct Crawler<F, E> {
    fetcher: F,
    extractor: E,
    seed: Url,
    user_agent: String,
    frontier: Frontier,
    visited: VisitedSet,
    /// URLs pushed onto the frontier this run; keeps duplicates out of the queue
    scheduled: HashSet<String>,
    budget: CrawlBudget,
    gate: RobotsGate,
    phase: CrawlPhase,
    stop: Arc<AtomicBool>,
    visits: Vec<VisitRecord>,
    robots_denied: usize,
    malformed_links: usize,
}

impl<F: Fetcher, E: LinkExtractor> Crawler<F, E> {
    /// Creates a controller in the `Idle` phase with `seed` queued at depth 1
    ///
    /// The seed's fragment is dropped so it shares a key with links to it.
    pub fn new(config: &Config, mut seed: Url, fetcher: F, extractor: E) -> Self {
        seed.set_fragment(None);

        let mut frontier = Frontier::new();
        frontier.push(FrontierItem::new(seed.clone(), 1));

        let mut scheduled = HashSet::new();
        scheduled.insert(seed.as_str().to_string());

        Self {
            fetcher,
            extractor,
            seed,
            user_agent: config.user_agent.robots_token().to_string(),
            frontier,
            visited: VisitedSet::new(),
            scheduled,
            budget: CrawlBudget::from_config(&config.crawler),
            gate: RobotsGate::from_config(&config.crawler),
            phase: CrawlPhase::Idle,
            stop: Arc::new(AtomicBool::new(false)),
            visits: Vec::new(),
            robots_denied: 0,
            malformed_links: 0,
        }
    }

    /// Current controller phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Flag that ends the run before the next frontier pop once set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs the crawl to completion and returns its report
    ///
    /// Page-level failures never end the run; the only error is an illegal
    /// phase transition, which would indicate a bug in this loop.
    pub async fn run(mut self) -> crate::Result<CrawlReport> {
        let started_at = Utc::now();
        tracing::info!(
            "Starting crawl of {} (max depth {}, max pages {})",
            self.seed,
            self.budget.max_depth,
            self.budget.max_pages
        );

        self.transition(CrawlPhase::Running)?;
        self.admit_seed().await;

        let end_reason = loop {
            if self.stop.load(Ordering::Relaxed) {
                tracing::info!("Stop requested, halting crawl");
                break EndReason::Stopped;
            }

            if self.budget.is_exhausted() {
                tracing::info!("Page budget of {} reached", self.budget.max_pages);
                break EndReason::PageBudgetReached;
            }

            let Some(item) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break EndReason::FrontierExhausted;
            };

            if !self.budget.allows_depth(item.depth) {
                tracing::debug!("Dropping {} at depth {}", item.url, item.depth);
                continue;
            }

            if !self.visited.add(&item.url) {
                tracing::debug!("Already visited {}", item.url);
                continue;
            }

            self.budget.record_visit();
            tracing::info!("Visiting {}", item.url);

            let outcome = self.visit(&item).await;
            self.visits.push(VisitRecord {
                url: item.url,
                depth: item.depth,
                outcome,
            });

            if self.visits.len() % 50 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier",
                    self.visits.len(),
                    self.frontier.len()
                );
            }
        };

        self.transition(end_reason.phase())?;
        let unprocessed = self.frontier.discard_remaining();
        if unprocessed > 0 {
            tracing::info!("Discarding {} unprocessed frontier items", unprocessed);
        }
        self.transition(CrawlPhase::Done)?;

        let finished_at = Utc::now();
        tracing::info!(
            "Crawl finished ({}): {} pages visited in {:.1}s",
            end_reason,
            self.visits.len(),
            (finished_at - started_at).num_milliseconds() as f64 / 1000.0
        );

        Ok(CrawlReport {
            seed: self.seed,
            visits: self.visits,
            end_reason,
            final_phase: self.phase,
            unprocessed,
            robots_denied: self.robots_denied,
            malformed_links: self.malformed_links,
            robots_origins: self.gate.cache().len(),
            robots_fallbacks: self.gate.cache().fallback_count(),
            started_at,
            finished_at,
        })
    }

    fn transition(&mut self, next: CrawlPhase) -> crate::Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Removes the seed from the frontier if robots.txt forbids it
    async fn admit_seed(&mut self) {
        if self
            .gate
            .is_allowed(&self.fetcher, &self.seed, &self.user_agent)
            .await
        {
            return;
        }

        tracing::warn!("Seed {} is disallowed by robots.txt", self.seed);
        self.robots_denied += 1;
        self.frontier.discard_remaining();
    }

    /// Fetches one page and queues its links; failures stay local to the page
    async fn visit(&mut self, item: &FrontierItem) -> PageOutcome {
        let mut target = item.url.clone();
        let mut hops = 0;

        let page = loop {
            match self.fetcher.fetch(&target).await {
                Ok(page) => break page,
                Err(FetchError::Redirect { location, .. }) if hops < MAX_REDIRECTS => {
                    hops += 1;
                    match self.admit_redirect(&target, &location).await {
                        Some(next) => {
                            tracing::debug!("Following redirect {} -> {}", target, next);
                            target = next;
                        }
                        None => return PageOutcome::Redirected { to: location },
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", target, e);
                    return PageOutcome::from(&e);
                }
            }
        };

        let raw_links = self.extractor.extract_links(&page.text());
        let links_found = raw_links.len();
        let links_enqueued = self.enqueue_links(&page.url, item.depth + 1, raw_links).await;

        tracing::debug!(
            "{}: {} links found, {} queued",
            item.url,
            links_found,
            links_enqueued
        );

        PageOutcome::Fetched {
            links_found,
            links_enqueued,
        }
    }

    /// Decides whether a redirect from `from` to `location` may be followed
    ///
    /// The target gets the same treatment as a discovered link: it must
    /// normalize, be unvisited and be allowed by its own robots.txt. An
    /// admitted target is marked visited so it is fetched at most once.
    async fn admit_redirect(&mut self, from: &Url, location: &str) -> Option<Url> {
        let next = match resolve_link(from, location) {
            Ok(next) => next,
            Err(e) => {
                tracing::debug!("Not following redirect {:?} from {}: {}", location, from, e);
                self.malformed_links += 1;
                return None;
            }
        };

        if self.visited.contains(&next) {
            tracing::debug!("Redirect target {} already visited", next);
            return None;
        }

        if !self
            .gate
            .is_allowed(&self.fetcher, &next, &self.user_agent)
            .await
        {
            tracing::debug!("Redirect target disallowed by robots.txt: {}", next);
            self.robots_denied += 1;
            return None;
        }

        self.visited.add(&next);
        self.scheduled.insert(next.as_str().to_string());
        Some(next)
    }

    /// Normalizes raw links found on `base` and pushes novel, permitted ones
    ///
    /// Returns the number of links pushed.
    async fn enqueue_links(&mut self, base: &Url, depth: u32, raw_links: Vec<String>) -> usize {
        // Depth is enforced here, at push time
        if !self.budget.allows_depth(depth) {
            return 0;
        }

        let mut enqueued = 0;
        for href in raw_links {
            let link = match resolve_link(base, &href) {
                Ok(link) => link,
                Err(e) => {
                    tracing::debug!("Skipping link {:?} on {}: {}", href, base, e);
                    self.malformed_links += 1;
                    continue;
                }
            };

            if self.visited.contains(&link) || self.scheduled.contains(link.as_str()) {
                continue;
            }

            if !self
                .gate
                .is_allowed(&self.fetcher, &link, &self.user_agent)
                .await
            {
                tracing::debug!("Disallowed by robots.txt: {}", link);
                self.robots_denied += 1;
                continue;
            }

            self.scheduled.insert(link.as_str().to_string());
            self.frontier.push(FrontierItem::new(link, depth));
            enqueued += 1;
        }

        enqueued
    }
}

/// Runs a complete crawl over HTTP
///
/// Builds the reqwest-backed fetcher and the scraper-backed link extractor
/// from `config`, then crawls from `seed`. If `stop` is given, setting it
/// halts the run before the next page.
///
/// # Example
///
/// ```no_run
/// use wavefront::config::Config;
/// use wavefront::crawler::run_crawl;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = Url::parse("https://example.com/")?;
/// let report = run_crawl(&Config::default(), seed, None).await?;
/// println!("visited {} pages", report.pages_visited());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    seed: Url,
    stop: Option<Arc<AtomicBool>>,
) -> crate::Result<CrawlReport> {
    let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
    let fetcher = HttpFetcher::new(&config.user_agent, timeout)?;

    let mut crawler = Crawler::new(config, seed, fetcher, HtmlLinkExtractor);
    if let Some(stop) = stop {
        crawler.stop = stop;
    }
    crawler.run().await
}
