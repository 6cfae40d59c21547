//! Outbound-link extraction from fetched page content
//!
//! Parses captured HTML and resolves every anchor `href` to an absolute URL
//! against the page's own URL, honoring an in-document `<base href>`
//! override. Extraction is deliberately permissive: validity judgments
//! belong to the trap filter, and duplicate suppression belongs to the
//! frontier.

use crate::corpus::PageFetch;
use scraper::{Html, Selector};
use url::Url;

/// Extracts candidate outbound links from a fetched page.
///
/// Returns absolute URLs in document order, duplicates included. Pages with
/// absent content, an unparseable source URL, or markup the parser cannot
/// recover anything from yield an empty list rather than an error.
///
/// # Arguments
///
/// * `fetch` - The fetched page record
///
/// # Example
///
/// ```
/// use trapline::corpus::PageFetch;
/// use trapline::crawler::extract_links;
///
/// let fetch = PageFetch {
///     url: "http://www.ics.uci.edu/".to_string(),
///     content: Some(b"<a href=\"/about\">About</a>".to_vec()),
///     size: 26,
/// };
/// let links = extract_links(&fetch);
/// assert_eq!(links, vec!["http://www.ics.uci.edu/about"]);
/// ```
pub fn extract_links(fetch: &PageFetch) -> Vec<String> {
    let content = match &fetch.content {
        Some(content) => content,
        None => return Vec::new(),
    };

    let page_url = match Url::parse(&fetch.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", fetch.url, e);
            return Vec::new();
        }
    };

    let html = String::from_utf8_lossy(content);
    let document = Html::parse_document(&html);

    let base_url = effective_base(&document, &page_url);

    let mut links = Vec::new();
    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if href.is_empty() {
                    continue;
                }
                match base_url.join(href) {
                    Ok(absolute) => links.push(absolute.to_string()),
                    Err(e) => {
                        tracing::debug!("Skipping unresolvable href '{}': {}", href, e);
                    }
                }
            }
        }
    }

    links
}

/// Resolves the document's base URL, honoring the first `<base href>` element
fn effective_base(document: &Html, page_url: &Url) -> Url {
    if let Ok(base_selector) = Selector::parse("base[href]") {
        if let Some(element) = document.select(&base_selector).next() {
            if let Some(href) = element.value().attr("href") {
                if let Ok(base) = page_url.join(href.trim()) {
                    return base;
                }
            }
        }
    }
    page_url.clone()
}
