//! HTML extractor for page text and links
//!
//! This module handles parsing HTML content to extract:
//! - The readable text of a page, with boilerplate regions removed
//! - Links to follow (from <a> tags), filtered to the crawl origin

use crate::url::{admit, NormalizedUrl, Origin};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text never reaches the output
pub const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "footer", "header", "aside", "form", "iframe", "svg",
    "template",
];

/// Href prefixes that never point at a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:", "data:"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Readable text, one non-empty trimmed line per item
    pub text: String,

    /// Same-origin crawlable links, normalized, in first-seen order
    pub links: Vec<NormalizedUrl>,
}

/// Parses HTML content and extracts text and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere, including inside nav, header and footer
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links
/// - Links leaving `origin` or failing the crawlability filter
///
/// # Arguments
///
/// * `base_url` - The URL the HTML was served from, after redirects
/// * `html` - The HTML content to parse
/// * `origin` - The crawl origin links must stay within
///
/// # Example
///
/// ```
/// use site_harvest::crawler::extract_page;
/// use site_harvest::Origin;
/// use url::Url;
///
/// let html = r#"<html><body><nav><a href="/about">About</a></nav><p>Welcome</p></body></html>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// let origin = Origin::from_url(&base).unwrap();
/// let page = extract_page(&base, html, &origin);
/// assert_eq!(page.text, "Welcome");
/// assert_eq!(page.links[0].as_str(), "https://example.com/about");
/// ```
pub fn extract_page(base_url: &Url, html: &str, origin: &Origin) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        text: document_text(&document),
        links: extract_links(&document, base_url, origin),
    }
}

/// Extracts only the readable text of an HTML document
pub fn extract_text(html: &str) -> String {
    document_text(&Html::parse_document(html))
}

fn document_text(document: &Html) -> String {
    let mut lines = Vec::new();
    collect_text(document.root_element(), &mut lines);
    lines.join("\n")
}

/// Walks the element tree in document order, pruning skipped subtrees
fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if !SKIPPED_ELEMENTS.iter().any(|skipped| name.eq_ignore_ascii_case(skipped)) {
                collect_text(child_element, lines);
            }
        } else if let Some(text) = child.value().as_text() {
            lines.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }
    }
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url, origin: &Origin) -> Vec<NormalizedUrl> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(link) = resolve_link(href, base_url, origin) {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }

    links
}

/// Resolves a link href against the page URL and admits it to the crawl
///
/// Returns None if the link should be excluded:
/// - Special schemes and fragment-only hrefs
/// - Unresolvable hrefs
/// - Other origins and uncrawlable URLs
fn resolve_link(href: &str, base_url: &Url, origin: &Origin) -> Option<NormalizedUrl> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    admit(absolute, origin)
}
