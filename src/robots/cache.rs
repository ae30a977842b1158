//! Per-origin robots.txt cache
//!
//! Entries live for the whole crawl run and are never invalidated, so every
//! origin's robots.txt is requested at most once per run.

use crate::robots::ParsedRobots;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Where a cached policy came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// robots.txt answered 2xx and was parsed
    Published,

    /// robots.txt answered a 4xx other than 401/403: no policy published
    NotPublished { status: u16 },

    /// robots.txt answered 401 or 403: the origin is off limits
    Forbidden { status: u16 },

    /// robots.txt could not be fetched or parsed; the fallback policy applies
    Fallback,
}

/// Cached robots.txt policy for an origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    pub policy: ParsedRobots,
    pub source: PolicySource,
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    pub fn new(policy: ParsedRobots, source: PolicySource) -> Self {
        Self {
            policy,
            source,
            fetched_at: Utc::now(),
        }
    }

    pub fn can_fetch(&self, user_agent: &str, url: &str) -> bool {
        self.policy.can_fetch(user_agent, url)
    }
}

/// Robots policies keyed by origin (`scheme://host[:port]`)
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, CachedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, origin: &str) -> Option<&CachedRobots> {
        self.entries.get(origin)
    }

    /// Stores the policy for an origin and returns a reference to it
    pub fn insert(&mut self, origin: String, cached: CachedRobots) -> &CachedRobots {
        self.entries.insert(origin.clone(), cached);
        &self.entries[&origin]
    }

    /// Number of origins with a cached policy
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of origins whose policy is the fallback
    pub fn fallback_count(&self) -> usize {
        self.entries
            .values()
            .filter(|cached| cached.source == PolicySource::Fallback)
            .count()
    }
}
