use serde::Deserialize;

/// Main configuration structure for a crawl
///
/// Every section and key is optional; missing values fall back to the
/// defaults documented on each field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawl traversal and budget configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Seed URL to start from (usually given on the command line instead)
    pub seed: Option<String>,

    /// Maximum link depth; the seed is depth 1 (default 2)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages fetched in one run (default 1000)
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Per-request timeout in seconds, applied to pages and robots.txt (default 30)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Whether robots.txt is consulted at all (default true)
    #[serde(rename = "respect-robots")]
    pub respect_robots: bool,

    /// Policy applied when an origin's robots.txt cannot be fetched or parsed
    #[serde(rename = "robots-fallback")]
    pub robots_fallback: RobotsFallback,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_depth: 2,
            max_pages: 1000,
            request_timeout_secs: 30,
            respect_robots: true,
            robots_fallback: RobotsFallback::Allow,
        }
    }
}

/// What the robots gate decides when robots.txt is unavailable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RobotsFallback {
    /// No usable policy means no restrictions
    #[default]
    Allow,
    /// No usable policy means nothing on that origin is fetched
    Deny,
}

impl RobotsFallback {
    pub fn allows(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Product token, also used to select robots.txt groups
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "Wavefront".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Full `User-Agent` header value, e.g. `Wavefront/0.1.0 (+https://example.com/bot)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }

    /// Token matched against `User-agent:` lines in robots.txt
    pub fn robots_token(&self) -> &str {
        &self.crawler_name
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed: Option<String>,
    pub max_depth: Option<u32>,
    pub max_pages: Option<u32>,
    pub crawler_name: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub robots_fallback: Option<RobotsFallback>,
    pub ignore_robots: bool,
}

impl Config {
    /// Applies command-line overrides on top of file (or default) values
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(seed) = overrides.seed {
            self.crawler.seed = Some(seed);
        }
        if let Some(depth) = overrides.max_depth {
            self.crawler.max_depth = depth;
        }
        if let Some(pages) = overrides.max_pages {
            self.crawler.max_pages = pages;
        }
        if let Some(name) = overrides.crawler_name {
            self.user_agent.crawler_name = name;
        }
        if let Some(timeout) = overrides.request_timeout_secs {
            self.crawler.request_timeout_secs = timeout;
        }
        if let Some(fallback) = overrides.robots_fallback {
            self.crawler.robots_fallback = fallback;
        }
        if overrides.ignore_robots {
            self.crawler.respect_robots = false;
        }
    }
}
