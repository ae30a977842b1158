use crate::FetchError;
use std::fmt;

/// What happened when a page was visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page fetched and its links processed
    Fetched {
        /// Raw links the extractor returned
        links_found: usize,
        /// Links that passed normalization, dedup and robots and were queued
        links_enqueued: usize,
    },

    /// Server answered with a non-2xx status
    HttpError { status: u16 },

    /// Connection, DNS, TLS or timeout failure
    NetworkError { message: String },

    /// Redirect not followed: target already visited, disallowed by
    /// robots.txt, malformed, or past the hop limit
    Redirected { to: String },
}

impl PageOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }

    /// True for failed fetches; a declined redirect is neither success nor error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::HttpError { .. } | Self::NetworkError { .. })
    }

    /// Short label used when grouping outcomes in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fetched { .. } => "fetched",
            Self::HttpError { .. } => "http_error",
            Self::NetworkError { .. } => "network_error",
            Self::Redirected { .. } => "redirected",
        }
    }
}

impl From<&FetchError> for PageOutcome {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::HttpStatus { status, .. } => Self::HttpError { status: *status },
            FetchError::Network { message, .. } => Self::NetworkError {
                message: message.clone(),
            },
            FetchError::Redirect { location, .. } => Self::Redirected {
                to: location.clone(),
            },
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetched {
                links_found,
                links_enqueued,
            } => write!(f, "fetched ({} links, {} queued)", links_found, links_enqueued),
            Self::HttpError { status } => write!(f, "HTTP {}", status),
            Self::NetworkError { message } => write!(f, "network error: {}", message),
            Self::Redirected { to } => write!(f, "redirected to {} (not followed)", to),
        }
    }
}
