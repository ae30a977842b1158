//! Wavefront: a breadth-first, robots.txt-respecting web crawler
//!
//! This crate implements a crawler that starts from a seed URL and visits
//! hyperlinked pages level by level, bounded by a maximum link depth and a
//! maximum page count. Every discovered link is checked against the target
//! site's robots.txt before it is queued.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl runs
///
/// Errors in this type end a run (or prevent it from starting). Page-level
/// failures are reported through [`FetchError`] and never abort a crawl.
/// Settings problems surface earlier, as [`ConfigError`], before a crawler
/// is built.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while turning a raw link into a crawlable URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Empty link")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Failure of a single page fetch
///
/// Network failures and non-2xx responses are kept apart so callers can tell
/// an unreachable host from a server that answered with an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// 3xx with a `Location` header; the caller decides whether to follow it
    #[error("HTTP {status} redirect from {url} to {location}")]
    Redirect {
        url: String,
        status: u16,
        location: String,
    },
}

impl FetchError {
    /// The URL the failed request was made for
    pub fn url(&self) -> &str {
        match self {
            Self::Network { url, .. } | Self::HttpStatus { url, .. } | Self::Redirect { url, .. } => {
                url
            }
        }
    }
}

/// Failure to obtain a usable robots.txt policy for an origin
///
/// These never propagate out of the robots gate; they resolve to the
/// configured fallback policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobotsFetchError {
    #[error("robots.txt unreachable at {url}: {message}")]
    Network { url: String, message: String },

    #[error("robots.txt at {url} answered HTTP {status}")]
    ServerError { url: String, status: u16 },

    #[error("robots.txt at {url} is not valid UTF-8")]
    Unparseable { url: String },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Crawler};
pub use output::CrawlReport;
pub use state::{CrawlPhase, PageOutcome};
pub use crate::url::{normalize_url, resolve_link};
