//! Crawler module for breadth-first page traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] trait
//! - HTML link extraction behind the [`LinkExtractor`] trait
//! - The FIFO frontier, visited set and run budget
//! - The crawl controller that ties them together

mod budget;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod visited;

pub use budget::CrawlBudget;
pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierItem};
pub use parser::{extract_links, HtmlLinkExtractor, LinkExtractor};
pub use visited::VisitedSet;

#[cfg(test)]
pub(crate) use fetcher::testing;
