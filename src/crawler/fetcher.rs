//! HTTP fetch capability
//!
//! The crawl controller and the robots gate only see the [`Fetcher`] trait.
//! [`HttpFetcher`] is the reqwest-backed implementation used by the binary;
//! tests drive the controller with an in-memory fake instead.

use crate::config::UserAgentConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Connect timeout cap; the overall request timeout still applies
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully fetched resource
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the body was served from; relative links resolve against this
    pub url: Url,

    /// HTTP status code (always 2xx)
    pub status: u16,

    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Capability to fetch a URL
///
/// Implementations must not follow redirects themselves. A 3xx response with
/// a `Location` header is reported as [`FetchError::Redirect`] so the caller
/// can run the target through the same visited and robots checks as any other
/// link. Other non-2xx responses are [`FetchError::HttpStatus`], and everything
/// else that prevents a response (DNS, connect, TLS, timeout, body read) is
/// [`FetchError::Network`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}

/// Builds an HTTP client with the crawler's identity and timeouts
///
/// Redirects are not followed by the client; see [`Fetcher`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wavefront::config::UserAgentConfig;
/// use wavefront::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`Fetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        let status = response.status();
        if status.is_redirection() {
            if let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
            {
                return Err(FetchError::Redirect {
                    url: url.to_string(),
                    status: status.as_u16(),
                    location: location.to_string(),
                });
            }
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| network_error(url, &e))?;

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

/// Classifies a transport error into a readable network failure
fn network_error(url: &Url, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Network {
        url: url.to_string(),
        message,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory web used to drive the crawler in unit tests

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum FakeResponse {
        Body(Vec<u8>),
        Status(u16),
        Redirect(String),
        Unreachable,
    }

    /// A fake set of sites; unknown URLs answer 404
    #[derive(Default)]
    pub struct FakeWeb {
        responses: HashMap<String, FakeResponse>,
        requests: Mutex<Vec<String>>,
    }

    fn key(url: &str) -> String {
        Url::parse(url).unwrap().to_string()
    }

    impl FakeWeb {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn page(self, url: &str, html: &str) -> Self {
            self.bytes(url, html.as_bytes().to_vec())
        }

        pub fn bytes(mut self, url: &str, body: Vec<u8>) -> Self {
            self.responses.insert(key(url), FakeResponse::Body(body));
            self
        }

        pub fn robots(self, origin: &str, body: &str) -> Self {
            self.page(&format!("{}/robots.txt", origin), body)
        }

        pub fn status(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(key(url), FakeResponse::Status(status));
            self
        }

        /// Answers `url` with a 301 pointing at `location` (kept raw, may be relative)
        pub fn redirect(mut self, url: &str, location: &str) -> Self {
            self.responses
                .insert(key(url), FakeResponse::Redirect(location.to_string()));
            self
        }

        pub fn unreachable(mut self, url: &str) -> Self {
            self.responses.insert(key(url), FakeResponse::Unreachable);
            self
        }

        /// Every URL requested so far, in order
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        /// Requested URLs excluding robots.txt lookups
        pub fn page_requests(&self) -> Vec<String> {
            self.requests()
                .into_iter()
                .filter(|u| !u.ends_with("/robots.txt"))
                .collect()
        }

        pub fn count(&self, url: &str) -> usize {
            let wanted = key(url);
            self.requests().iter().filter(|u| **u == wanted).count()
        }
    }

    #[async_trait]
    impl Fetcher for FakeWeb {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());

            match self.responses.get(url.as_str()) {
                Some(FakeResponse::Body(body)) => Ok(FetchedPage {
                    url: url.clone(),
                    status: 200,
                    body: body.clone(),
                }),
                Some(FakeResponse::Status(status)) => Err(FetchError::HttpStatus {
                    url: url.to_string(),
                    status: *status,
                }),
                Some(FakeResponse::Redirect(location)) => Err(FetchError::Redirect {
                    url: url.to_string(),
                    status: 301,
                    location: location.clone(),
                }),
                Some(FakeResponse::Unreachable) => Err(FetchError::Network {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                }),
                None => Err(FetchError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }
}
