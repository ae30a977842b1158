//! Robots policy gate
//!
//! Decides whether a URL may be fetched. Each origin's robots.txt is fetched
//! the first time a URL on that origin is checked; the resulting policy
//! (or the fallback, when none could be obtained) is reused for the rest of
//! the run.

use crate::config::{CrawlerConfig, RobotsFallback};
use crate::crawler::Fetcher;
use crate::robots::{fetch_robots, CachedRobots, ParsedRobots, PolicySource, RobotsCache};
use crate::url::{origin_of, robots_url};
use url::Url;

pub struct RobotsGate {
    cache: RobotsCache,
    fallback: RobotsFallback,
    enabled: bool,
}

impl RobotsGate {
    /// A gate that enforces robots.txt, using `fallback` when it is unavailable
    pub fn new(fallback: RobotsFallback) -> Self {
        Self {
            cache: RobotsCache::new(),
            fallback,
            enabled: true,
        }
    }

    /// A gate that allows everything and never requests robots.txt
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(RobotsFallback::Allow)
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        if config.respect_robots {
            Self::new(config.robots_fallback)
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn cache(&self) -> &RobotsCache {
        &self.cache
    }

    /// Checks whether `user_agent` may fetch `url`
    ///
    /// Never fails: an origin whose robots.txt cannot be fetched or parsed
    /// gets the fallback policy, and that decision is cached like any other.
    pub async fn is_allowed<F: Fetcher + ?Sized>(
        &mut self,
        fetcher: &F,
        url: &Url,
        user_agent: &str,
    ) -> bool {
        if !self.enabled {
            return true;
        }

        let Some(origin) = origin_of(url) else {
            tracing::debug!("No origin for {}, denying", url);
            return false;
        };

        if let Some(cached) = self.cache.get(&origin) {
            return cached.can_fetch(user_agent, url.as_str());
        }

        let cached = self.load(fetcher, url, &origin).await;
        self.cache
            .insert(origin, cached)
            .can_fetch(user_agent, url.as_str())
    }

    async fn load<F: Fetcher + ?Sized>(&self, fetcher: &F, url: &Url, origin: &str) -> CachedRobots {
        let Some(robots) = robots_url(url) else {
            return self.fallback_entry();
        };

        tracing::debug!("Fetching robots.txt for origin: {}", origin);
        match fetch_robots(fetcher, &robots).await {
            Ok((policy, source)) => {
                tracing::debug!("robots.txt for {}: {:?}", origin, source);
                CachedRobots::new(policy, source)
            }
            Err(e) => {
                tracing::warn!("{}; applying {:?} fallback to {}", e, self.fallback, origin);
                self.fallback_entry()
            }
        }
    }

    fn fallback_entry(&self) -> CachedRobots {
        let policy = if self.fallback.allows() {
            ParsedRobots::allow_all()
        } else {
            ParsedRobots::deny_all()
        };
        CachedRobots::new(policy, PolicySource::Fallback)
    }
}
