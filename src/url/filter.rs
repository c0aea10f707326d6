use url::Url;

/// File extensions that never serve an HTML page
const SKIP_EXTENSIONS: &[&str] = &[
    // images
    "jpg", "jpeg", "png", "gif", "webp", "svg", "ico", "bmp", "tif", "tiff", "avif",
    // video
    "mp4", "webm", "mov", "avi", "mkv", "m4v", "wmv", "flv",
    // audio
    "mp3", "wav", "ogg", "flac", "m4a", "aac",
    // archives and binaries
    "zip", "gz", "tgz", "tar", "rar", "7z", "bz2", "xz", "exe", "dmg", "iso", "msi", "apk",
    // stylesheets, scripts, source maps
    "css", "js", "mjs", "map",
    // fonts
    "woff", "woff2", "ttf", "eot", "otf",
    // office and PDF documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf",
    // data formats
    "json", "csv", "xml", "rss", "atom", "yaml", "yml",
];

/// Single path segments that mark non-content areas of a site
const SKIP_SEGMENTS: &[&str] = &[
    "wp-admin",
    "wp-login",
    "wp-login.php",
    "wp-json",
    "admin",
    "login",
    "logout",
    "signin",
    "signup",
    "cart",
    "checkout",
    "feed",
    "rss",
];

/// Multi-segment path prefixes that mark upload directories
const SKIP_SEGMENT_PAIRS: &[(&str, &str)] = &[("wp-content", "uploads")];

/// Decides whether a URL is worth fetching as a content page
///
/// Rejects URLs whose path ends in a known non-HTML extension, or that pass
/// through admin, auth, cart/checkout, upload or feed segments. Matching is
/// case-insensitive. Unparsable URLs are not crawlable.
///
/// # Examples
///
/// ```
/// use site_harvest::url::is_crawlable;
///
/// assert!(is_crawlable("https://x.com/about"));
/// assert!(!is_crawlable("https://x.com/img/logo.png"));
/// assert!(!is_crawlable("https://x.com/wp-admin/"));
/// ```
pub fn is_crawlable(url_str: &str) -> bool {
    match Url::parse(url_str.trim()) {
        Ok(url) => is_crawlable_url(&url),
        Err(_) => false,
    }
}

/// [`is_crawlable`] for an already-parsed URL
pub fn is_crawlable_url(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    !has_skipped_extension(&path) && !has_skipped_segment(&path)
}

fn has_skipped_extension(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => SKIP_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

fn has_skipped_segment(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.iter().any(|s| SKIP_SEGMENTS.contains(s)) {
        return true;
    }

    segments
        .windows(2)
        .any(|pair| SKIP_SEGMENT_PAIRS.contains(&(pair[0], pair[1])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pages_are_crawlable() {
        assert!(is_crawlable("https://x.com/about"));
        assert!(is_crawlable("https://x.com"));
        assert!(is_crawlable("https://x.com/blog/2024/hello-world"));
        assert!(is_crawlable("https://x.com/index.html"));
        assert!(is_crawlable("https://x.com/page.php?id=4"));
    }

    #[test]
    fn test_binary_extensions_rejected() {
        assert!(!is_crawlable("https://x.com/img/logo.png"));
        assert!(!is_crawlable("https://x.com/files/report.pdf"));
        assert!(!is_crawlable("https://x.com/static/app.js"));
        assert!(!is_crawlable("https://x.com/static/site.css"));
        assert!(!is_crawlable("https://x.com/fonts/a.woff2"));
        assert!(!is_crawlable("https://x.com/data/export.csv"));
        assert!(!is_crawlable("https://x.com/downloads/release.tar"));
        assert!(!is_crawlable("https://x.com/media/intro.mp4"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert!(!is_crawlable("https://x.com/IMG/LOGO.PNG"));
        assert!(!is_crawlable("https://x.com/Docs/Guide.PDF"));
    }

    #[test]
    fn test_query_does_not_hide_extension() {
        assert!(!is_crawlable("https://x.com/logo.png?v=3"));
    }

    #[test]
    fn test_non_content_paths_rejected() {
        assert!(!is_crawlable("https://x.com/wp-admin/"));
        assert!(!is_crawlable("https://x.com/wp-admin/options.php"));
        assert!(!is_crawlable("https://x.com/wp-login.php"));
        assert!(!is_crawlable("https://x.com/admin"));
        assert!(!is_crawlable("https://x.com/account/login"));
        assert!(!is_crawlable("https://x.com/cart"));
        assert!(!is_crawlable("https://x.com/checkout/step-1"));
        assert!(!is_crawlable("https://x.com/feed/"));
        assert!(!is_crawlable("https://x.com/wp-content/uploads/2024/file"));
        assert!(!is_crawlable("https://x.com/Admin/Users"));
    }

    #[test]
    fn test_segment_match_is_exact() {
        assert!(is_crawlable("https://x.com/administration-guide"));
        assert!(is_crawlable("https://x.com/feedback"));
        assert!(is_crawlable("https://x.com/wp-content/themes/page"));
    }

    #[test]
    fn test_dotfile_segment_is_not_an_extension() {
        assert!(is_crawlable("https://x.com/.well-known"));
    }

    #[test]
    fn test_unparsable_is_not_crawlable() {
        assert!(!is_crawlable("::not a url::"));
    }
}
