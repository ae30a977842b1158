//! Crawl run report
//!
//! The controller's observable output is its sequence of visits. This module
//! collects them, together with the run's counters, into a report that can
//! be inspected by callers and printed at the end of a run.

use crate::state::{CrawlPhase, EndReason, PageOutcome};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use url::Url;

/// One page the crawler actually fetched (or tried to)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    pub url: Url,
    pub depth: u32,
    pub outcome: PageOutcome,
}

/// Summary of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Seed the run started from
    pub seed: Url,

    /// Visits in the order they happened
    pub visits: Vec<VisitRecord>,

    /// Why the run stopped popping items
    pub end_reason: EndReason,

    /// Phase the controller finished in (always `Done` for a completed run)
    pub final_phase: CrawlPhase,

    /// Frontier items dropped when the run halted
    pub unprocessed: usize,

    /// Candidate links (and a denied seed) refused by robots.txt
    pub robots_denied: usize,

    /// Raw links that could not be turned into an http(s) URL
    pub malformed_links: usize,

    /// Origins whose robots policy was looked up
    pub robots_origins: usize,

    /// Origins that got the fallback policy because robots.txt was unavailable
    pub robots_fallbacks: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    pub fn pages_visited(&self) -> usize {
        self.visits.len()
    }

    /// Visited URLs in visit order
    pub fn visited_urls(&self) -> Vec<&str> {
        self.visits.iter().map(|v| v.url.as_str()).collect()
    }

    /// Number of visits that fetched the page successfully
    pub fn succeeded(&self) -> usize {
        self.visits.iter().filter(|v| v.outcome.is_success()).count()
    }

    /// Number of visits whose fetch failed
    pub fn failed(&self) -> usize {
        self.visits.iter().filter(|v| v.outcome.is_error()).count()
    }

    /// Visit counts grouped by outcome label
    pub fn outcome_counts(&self) -> HashMap<&'static str, usize> {
        let mut counts = HashMap::new();
        for visit in &self.visits {
            *counts.entry(visit.outcome.label()).or_insert(0) += 1;
        }
        counts
    }

    /// Deepest level reached by a visit
    pub fn max_depth_reached(&self) -> u32 {
        self.visits.iter().map(|v| v.depth).max().unwrap_or(0)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Prints a report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Seed: {}", report.seed);
    println!("  Ended: {} ({})", report.end_reason, report.final_phase);
    println!("  Pages visited: {}", report.pages_visited());
    println!("  Deepest level: {}", report.max_depth_reached());
    println!(
        "  Duration: {:.1}s",
        report.duration().num_milliseconds() as f64 / 1000.0
    );
    if report.unprocessed > 0 {
        println!("  Left in frontier: {}", report.unprocessed);
    }
    println!();

    println!("Visits by Outcome:");
    let mut counts: Vec<_> = report.outcome_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (label, count) in counts {
        println!("  {}: {}", label, count);
    }
    println!();

    println!("Links:");
    println!("  Denied by robots.txt: {}", report.robots_denied);
    println!("  Malformed or non-http: {}", report.malformed_links);
    println!(
        "  robots.txt origins: {} ({} on fallback policy)",
        report.robots_origins, report.robots_fallbacks
    );
    println!();

    let failures: Vec<_> = report
        .visits
        .iter()
        .filter(|v| v.outcome.is_error())
        .collect();
    if !failures.is_empty() {
        println!("Failed Pages ({}):", failures.len());
        for visit in failures {
            println!("  - {} [{}]", visit.url, visit.outcome);
        }
        println!();
    }

    let success_rate = if report.pages_visited() > 0 {
        (report.succeeded() as f64 / report.pages_visited() as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Success Rate: {:.1}% ({} / {} pages fetched)",
        success_rate,
        report.succeeded(),
        report.pages_visited()
    );
}
