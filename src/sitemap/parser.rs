//! Sitemap XML parser
//!
//! Elements are matched on their local name, so `<urlset>`, `<sm:urlset>` and
//! a default-namespaced `<urlset xmlns="...">` all parse the same way.

use crate::sitemap::SitemapError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// The shape of a parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// `<sitemapindex>`: `<sitemap><loc>` entries pointing at other sitemaps
    Index(Vec<String>),

    /// `<urlset>`: `<url><loc>` entries pointing at pages
    UrlSet(Vec<String>),

    /// Any other root element (or no root element at all)
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    Index,
    UrlSet,
}

impl Root {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sitemapindex" => Some(Self::Index),
            b"urlset" => Some(Self::UrlSet),
            _ => None,
        }
    }

    /// The element whose `<loc>` child is an entry of this document
    fn entry_element(self) -> &'static [u8] {
        match self {
            Self::Index => b"sitemap",
            Self::UrlSet => b"url",
        }
    }
}

/// Parses a sitemap or sitemap index
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The document shape and its `<loc>` values, trimmed
/// * `Err(SitemapError)` - The XML is malformed
///
/// # Example
///
/// ```
/// use site_harvest::sitemap::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<urlset><url><loc>https://x.com/a</loc></url></urlset>"#;
/// assert_eq!(
///     parse_sitemap(xml).unwrap(),
///     SitemapDocument::UrlSet(vec!["https://x.com/a".to_string()])
/// );
/// ```
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Root> = None;
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut current_loc: Option<String> = None;
    let mut locs = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();

                let kind = match root {
                    Some(kind) => kind,
                    None => match Root::from_local_name(&name) {
                        Some(kind) => {
                            root = Some(kind);
                            kind
                        }
                        None => return Ok(SitemapDocument::Other),
                    },
                };

                let in_entry = open
                    .last()
                    .map_or(false, |parent| parent.as_slice() == kind.entry_element());
                if name == b"loc" && in_entry {
                    current_loc = Some(String::new());
                }

                open.push(name);
            }
            Event::Empty(e) => {
                // A self-closing root is an empty document
                if root.is_none() {
                    return Ok(match Root::from_local_name(e.local_name().as_ref()) {
                        Some(Root::Index) => SitemapDocument::Index(Vec::new()),
                        Some(Root::UrlSet) => SitemapDocument::UrlSet(Vec::new()),
                        None => SitemapDocument::Other,
                    });
                }
            }
            Event::Text(t) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => {
                open.pop();
                if e.local_name().as_ref() == b"loc" {
                    if let Some(loc) = current_loc.take() {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            locs.push(loc.to_string());
                        }
                    }
                }
            }
            Event::Eof => {
                if root.is_some() && !open.is_empty() {
                    return Err(SitemapError::Truncated(open.len()));
                }
                break;
            }
            _ => {}
        }
    }

    Ok(match root {
        Some(Root::Index) => SitemapDocument::Index(locs),
        Some(Root::UrlSet) => SitemapDocument::UrlSet(locs),
        None => SitemapDocument::Other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://x.com/a</loc><lastmod>2024-01-01</lastmod></url>
  <url>
    <loc>
      https://x.com/b
    </loc>
  </url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            SitemapDocument::UrlSet(vec![
                "https://x.com/a".to_string(),
                "https://x.com/b".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://x.com/pages.xml</loc></sitemap>
  <sitemap><loc>https://x.com/posts.xml</loc></sitemap>
</sitemapindex>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            SitemapDocument::Index(vec![
                "https://x.com/pages.xml".to_string(),
                "https://x.com/posts.xml".to_string()
            ])
        );
    }

    #[test]
    fn test_prefixed_namespace() {
        let xml = r#"<sm:urlset xmlns:sm="http://example.org/custom-ns">
  <sm:url><sm:loc>https://x.com/prefixed</sm:loc></sm:url>
</sm:urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            SitemapDocument::UrlSet(vec!["https://x.com/prefixed".to_string()])
        );
    }

    #[test]
    fn test_loc_outside_entry_ignored() {
        let xml = r#"<urlset>
  <url><loc>https://x.com/page</loc>
    <image:image xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
      <image:loc>https://x.com/photo.jpg</image:loc>
    </image:image>
  </url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            SitemapDocument::UrlSet(vec!["https://x.com/page".to_string()])
        );
    }

    #[test]
    fn test_escaped_and_cdata_loc() {
        let xml = r#"<urlset>
  <url><loc>https://x.com/search?a=1&amp;b=2</loc></url>
  <url><loc><![CDATA[https://x.com/cdata]]></loc></url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            SitemapDocument::UrlSet(vec![
                "https://x.com/search?a=1&b=2".to_string(),
                "https://x.com/cdata".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(
            parse_sitemap("<urlset/>").unwrap(),
            SitemapDocument::UrlSet(vec![])
        );
    }

    #[test]
    fn test_html_root_is_other() {
        let html = "<html><body><a href=\"/a\">a</a></body></html>";
        assert_eq!(parse_sitemap(html).unwrap(), SitemapDocument::Other);
    }

    #[test]
    fn test_plain_text_is_other() {
        assert_eq!(
            parse_sitemap("not xml at all").unwrap(),
            SitemapDocument::Other
        );
    }

    #[test]
    fn test_truncated_document_error() {
        let xml = "<urlset><url><loc>https://x.com/a</loc></url><url><loc>https://x.com/b";
        assert!(matches!(
            parse_sitemap(xml),
            Err(SitemapError::Truncated(3))
        ));
    }

    #[test]
    fn test_mismatched_tags_error() {
        let xml = "<urlset><url><loc>https://x.com/a</loc></urlset>";
        assert!(parse_sitemap(xml).is_err());
    }
}
