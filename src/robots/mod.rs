//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching
//! robots.txt files, and the gate the crawler consults before queueing a link.

mod cache;
mod gate;
mod parser;

pub use cache::{CachedRobots, PolicySource, RobotsCache};
pub use gate::RobotsGate;
pub use parser::ParsedRobots;

use crate::crawler::{FetchedPage, Fetcher};
use crate::{FetchError, RobotsFetchError};
use url::Url;

/// Redirect hops followed when looking up robots.txt
const MAX_ROBOTS_REDIRECTS: usize = 5;

/// Fetches and parses the robots.txt at `robots_url`
///
/// | Response | Policy |
/// |----------|--------|
/// | 2xx, UTF-8 body | parsed rules |
/// | 401 / 403 | deny everything |
/// | other 4xx | allow everything (no policy published) |
/// | 5xx, network error, timeout | `RobotsFetchError::ServerError` / `Network` |
/// | 2xx, non-UTF-8 body | `RobotsFetchError::Unparseable` |
/// | more than 5 redirects, bad `Location` | `RobotsFetchError::Network` |
///
/// Redirects are followed, across origins too; the policy found at the end
/// applies to the origin that was asked about.
pub async fn fetch_robots<F: Fetcher + ?Sized>(
    fetcher: &F,
    robots_url: &Url,
) -> Result<(ParsedRobots, PolicySource), RobotsFetchError> {
    match fetch_following_redirects(fetcher, robots_url).await {
        Ok(page) => {
            let content =
                std::str::from_utf8(&page.body).map_err(|_| RobotsFetchError::Unparseable {
                    url: robots_url.to_string(),
                })?;
            Ok((ParsedRobots::from_content(content), PolicySource::Published))
        }
        Err(FetchError::HttpStatus {
            status: status @ (401 | 403),
            ..
        }) => Ok((ParsedRobots::deny_all(), PolicySource::Forbidden { status })),
        Err(FetchError::HttpStatus { status, .. }) if (400..500).contains(&status) => Ok((
            ParsedRobots::allow_all(),
            PolicySource::NotPublished { status },
        )),
        Err(FetchError::HttpStatus { url, status }) => {
            Err(RobotsFetchError::ServerError { url, status })
        }
        Err(FetchError::Network { url, message }) => Err(RobotsFetchError::Network { url, message }),
        Err(FetchError::Redirect { url, .. }) => Err(RobotsFetchError::Network {
            url,
            message: "too many redirects".to_string(),
        }),
    }
}

async fn fetch_following_redirects<F: Fetcher + ?Sized>(
    fetcher: &F,
    robots_url: &Url,
) -> Result<FetchedPage, FetchError> {
    let mut target = robots_url.clone();
    let mut hops = 0;

    loop {
        match fetcher.fetch(&target).await {
            Err(FetchError::Redirect { url, location, .. }) if hops < MAX_ROBOTS_REDIRECTS => {
                target = target.join(&location).map_err(|e| FetchError::Network {
                    url,
                    message: format!("invalid redirect location {:?}: {}", location, e),
                })?;
                hops += 1;
            }
            result => return result,
        }
    }
}
