use url::{Origin, Url};

/// Returns the robots.txt jurisdiction of a URL as `scheme://host[:port]`
///
/// Default ports are omitted, so `https://example.com:443/a` and
/// `https://example.com/b` share one origin while `http://example.com/`
/// is a different one.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wavefront::url::origin_of;
///
/// let url = Url::parse("https://Example.com:443/path?q=1").unwrap();
/// assert_eq!(origin_of(&url).as_deref(), Some("https://example.com"));
/// ```
pub fn origin_of(url: &Url) -> Option<String> {
    match url.origin() {
        origin @ Origin::Tuple(..) => Some(origin.ascii_serialization()),
        Origin::Opaque(_) => None,
    }
}

/// Returns `{origin}/robots.txt` for the origin `url` belongs to
pub fn robots_url(url: &Url) -> Option<Url> {
    let origin = origin_of(url)?;
    Url::parse(&format!("{}/robots.txt", origin)).ok()
}
