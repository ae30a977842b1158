use crate::UrlError;
use url::Url;

/// Normalizes an absolute URL string into the form used as a dedup key
///
/// # Normalization Rules
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only `http` and `https`
/// 3. Require a host
/// 4. Remove the fragment (everything after `#`)
///
/// Host case and default ports are canonicalized by the parser itself. No
/// other rewriting happens, so an absolute URL without a fragment comes back
/// unchanged.
///
/// # Examples
///
/// ```
/// use wavefront::url::normalize_url;
///
/// let url = normalize_url("https://example.com/docs#install").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(format!("{}: {}", trimmed, e)))?;
    finish(url)
}

/// Resolves a raw `href` against the page it was found on and normalizes it
///
/// Relative (`../a`), root-relative (`/a`), protocol-relative (`//host/a`)
/// and fragment-only (`#a`) references follow RFC 3986 resolution.
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, UrlError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    let joined = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    finish(joined)
}

fn finish(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    Ok(url)
}
