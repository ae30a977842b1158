//! HTML link extraction
//!
//! Extraction only collects raw `href` values in document order. Resolving
//! them against the page URL and filtering by scheme happens in the
//! controller, so the same rules apply whatever extractor is plugged in.

use scraper::{Html, Selector};

/// Capability to pull raw link targets out of a page body
pub trait LinkExtractor {
    /// Returns raw `href` values in document order
    fn extract_links(&self, body: &str) -> Vec<String>;
}

/// Extracts `<a href>` targets from HTML using scraper
///
/// **Skipped:**
/// - `<a download>` anchors
/// - `javascript:`, `mailto:`, `tel:` and `data:` hrefs
/// - empty hrefs
///
/// `rel="nofollow"` links are still returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str) -> Vec<String> {
        extract_links(body)
    }
}

/// Extracts raw anchor targets from an HTML document
///
/// # Example
///
/// ```
/// use wavefront::crawler::extract_links;
///
/// let html = r#"<a href="/a">A</a> <a href="mailto:x@example.com">mail</a> <a href="b.html">B</a>"#;
/// assert_eq!(extract_links(html), vec!["/a", "b.html"]);
/// ```
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(anchor) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&anchor) {
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            let href = href.trim();
            if !href.is_empty() && !has_skipped_scheme(href) {
                links.push(href.to_string());
            }
        }
    }

    links
}

/// Schemes that never lead to a crawlable page
fn has_skipped_scheme(href: &str) -> bool {
    const SKIPPED: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];

    SKIPPED.iter().any(|scheme| {
        href.get(..scheme.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
