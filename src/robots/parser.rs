//! Robots.txt policy representation
//!
//! Rule evaluation is delegated to the robotstxt crate (a port of Google's
//! matcher); this type adds the blanket allow/deny policies used when an
//! origin publishes no usable file.

use robotstxt::DefaultMatcher;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stance {
    AllowAll,
    DenyAll,
    Rules(String),
}

/// Parsed robots.txt policy for one origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRobots {
    stance: Stance,
}

impl ParsedRobots {
    /// Creates a policy from raw robots.txt content
    ///
    /// Empty content publishes no rules and allows everything.
    pub fn from_content(content: &str) -> Self {
        if content.trim().is_empty() {
            return Self::allow_all();
        }
        Self {
            stance: Stance::Rules(content.to_string()),
        }
    }

    /// A policy that allows every URL
    pub fn allow_all() -> Self {
        Self {
            stance: Stance::AllowAll,
        }
    }

    /// A policy that denies every URL
    pub fn deny_all() -> Self {
        Self {
            stance: Stance::DenyAll,
        }
    }

    /// Returns the raw robots.txt content, if this policy came from one
    pub fn content(&self) -> Option<&str> {
        match &self.stance {
            Stance::Rules(content) => Some(content),
            Stance::AllowAll | Stance::DenyAll => None,
        }
    }

    /// Checks if `url` may be fetched by `user_agent`
    ///
    /// `url` should be absolute; only its path and query are matched.
    /// Groups for `*` apply when no group names the user agent.
    pub fn can_fetch(&self, user_agent: &str, url: &str) -> bool {
        match &self.stance {
            Stance::AllowAll => true,
            Stance::DenyAll => false,
            Stance::Rules(content) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, user_agent, url)
            }
        }
    }
}
