//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_harvest::config::Config;
use site_harvest::{CrawlError, Crawler};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with fast retries
fn create_test_config(concurrency: usize) -> Config {
    let mut config = Config::default();
    config.crawler.concurrency = concurrency;
    config.crawler.backoff_base_secs = 0.01;
    config.crawler.request_timeout_secs = 5;
    config.crawler.robots_timeout_secs = 2;
    config.crawler.sitemap_timeout_secs = 2;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

/// An HTML page with a paragraph of text and the given links
fn page(text: &str, links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    let body = format!(
        "<html><body><nav>{anchors}</nav><main><p>{text}</p></main></body></html>"
    );
    ResponseTemplate::new(200)
        .set_body_raw(body, "text/html; charset=utf-8")
}

fn urlset(base: &str, paths: &[&str]) -> ResponseTemplate {
    let entries: String = paths
        .iter()
        .map(|p| format!("<url><loc>{}{}</loc></url>", base, p))
        .collect();
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    );
    ResponseTemplate::new(200)
        .set_body_raw(body, "application/xml")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_sitemap_and_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml", base)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/sitemap.xml", urlset(&base, &["/a", "/b"])).await;

    mount_page(&server, "/", page("Home", &["/c", "/a"])).await;
    mount_page(&server, "/a", page("Page A", &["/d"])).await;
    mount_page(&server, "/b", page("Page B", &["/e"])).await;
    mount_page(&server, "/c", page("Page C", &[])).await;
    mount_page(&server, "/d", page("Page D", &[])).await;
    mount_page(&server, "/e", page("Page E", &[])).await;

    let crawler = Crawler::new(create_test_config(8)).unwrap();
    let outcome = crawler.crawl(&base, 4).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 4);
    let urls: Vec<&str> = outcome.pages().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            base.clone(),
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/c", base),
        ]
    );

    let text = outcome.combined_text();
    assert!(text.starts_with(&format!("--- PAGE: {} ---\nHome\n\n", base)));
    assert!(text.contains(&format!("--- PAGE: {}/c ---\nPage C", base)));
    assert!(!text.contains("Page D"));
    assert_eq!(text.matches("--- PAGE: ").count(), 4);

    let stats = outcome.stats();
    assert_eq!(stats.sitemap_urls, 2);
    assert_eq!(stats.pages_accepted, 4);
    assert_eq!(stats.failures, 0);
}

#[tokio::test]
async fn test_content_dedup() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("Home", &["/about", "/about/index.html"])).await;
    mount_page(&server, "/about", page("About us", &[])).await;
    Mock::given(method("GET"))
        .and(path("/about/index.html"))
        .respond_with(page("About us", &[]))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(4)).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 2);
    assert_eq!(outcome.pages()[1].url, format!("{}/about", base));
    assert_eq!(outcome.combined_text().matches("About us").count(), 1);
    assert_eq!(outcome.stats().duplicates, 1);
}

#[tokio::test]
async fn test_max_pages_one_returns_seed_only() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("Home", &["/a", "/b"])).await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(page("Page A", &[]))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(8)).unwrap();
    let outcome = crawler.crawl(&base, 1).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 1);
    assert_eq!(outcome.pages()[0].url, base);
    assert_eq!(outcome.pages()[0].text, "Home");
}

#[tokio::test]
async fn test_failed_page_is_isolated() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("Home", &["/broken", "/ok"])).await;
    mount_page(&server, "/ok", page("Still here", &[])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(4)).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 2);
    let text = outcome.combined_text();
    assert!(text.contains("Still here"));
    assert!(!text.contains("/broken"));
    assert_eq!(outcome.stats().failures, 1);
}

#[tokio::test]
async fn test_no_url_fetched_twice() {
    let server = MockServer::start().await;
    let base = server.uri();

    for (route, text, links) in [
        ("/", "Home", vec!["/a", "/b", "/"]),
        ("/a", "Page A", vec!["/", "/b", "/a/"]),
        ("/b", "Page B", vec!["/a#top", "/", "/b"]),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(page(text, &links))
            .expect(1)
            .mount(&server)
            .await;
    }

    let crawler = Crawler::new(create_test_config(2)).unwrap();
    let outcome = crawler.crawl(&base, 50).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 3);
    assert_eq!(outcome.stats().urls_visited, 3);
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"))
        .mount(&server)
        .await;
    mount_page(&server, "/", page("Home", &["/private/notes", "/public"])).await;
    mount_page(&server, "/public", page("Public page", &[])).await;
    Mock::given(method("GET"))
        .and(path("/private/notes"))
        .respond_with(page("Secret", &[]))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(4)).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 2);
    assert!(!outcome.combined_text().contains("Secret"));
}

#[tokio::test]
async fn test_robots_disallow_can_be_disabled() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"))
        .mount(&server)
        .await;
    mount_page(&server, "/", page("Home", &["/private/notes"])).await;
    mount_page(&server, "/private/notes", page("Secret", &[])).await;

    let mut config = create_test_config(4);
    config.crawler.respect_robots_disallow = false;
    let crawler = Crawler::new(config).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 2);
    assert!(outcome.combined_text().contains("Secret"));
}

#[tokio::test]
async fn test_crawl_delay_honored() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 0.3"))
        .mount(&server)
        .await;
    mount_page(&server, "/", page("Home", &["/a"])).await;
    mount_page(&server, "/a", page("Page A", &[])).await;

    let crawler = Crawler::new(create_test_config(4)).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 2);
    assert_eq!(outcome.stats().crawl_delay, Some(0.3));
    // Two sequential batches, each holding its slot for the delay
    assert!(outcome.stats().elapsed >= Duration::from_millis(600));
}

#[tokio::test]
async fn test_non_html_pages_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("Home", &["/notes.txt", "/about"])).await;
    mount_page(&server, "/about", page("About us", &[])).await;
    mount_page(
        &server,
        "/notes.txt",
        ResponseTemplate::new(200).set_body_raw("plain notes", "text/plain"),
    )
    .await;

    let crawler = Crawler::new(create_test_config(4)).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 2);
    assert!(!outcome.combined_text().contains("plain notes"));
    assert_eq!(outcome.stats().empty_pages, 1);
}

#[tokio::test]
async fn test_acceptance_order_is_batch_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/sitemap.xml", urlset(&base, &["/slow", "/fast"])).await;
    mount_page(&server, "/", page("Home", &[])).await;
    mount_page(
        &server,
        "/slow",
        page("Slow page", &[]).set_delay(Duration::from_millis(300)),
    )
    .await;
    mount_page(&server, "/fast", page("Fast page", &[])).await;

    let crawler = Crawler::new(create_test_config(8)).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    let texts: Vec<&str> = outcome.pages().iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["Home", "Slow page", "Fast page"]);
}

#[tokio::test]
async fn test_links_resolved_against_redirect_target() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("Home", &["/old"])).await;
    mount_page(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", format!("{}/docs/", base).as_str()),
    )
    .await;
    mount_page(&server, "/docs/", page("Docs index", &["guide"])).await;
    mount_page(&server, "/docs/guide", page("Guide", &[])).await;

    let crawler = Crawler::new(create_test_config(4)).unwrap();
    let outcome = crawler.crawl(&base, 10).await.unwrap();

    let urls: Vec<&str> = outcome.pages().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            base.clone(),
            format!("{}/old", base),
            format!("{}/docs/guide", base),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_site_returns_empty() {
    let crawler = Crawler::new(create_test_config(4)).unwrap();
    let outcome = crawler.crawl("http://127.0.0.1:1", 10).await.unwrap();

    assert_eq!(outcome.pages_crawled(), 0);
    assert_eq!(outcome.combined_text(), "");
    assert_eq!(outcome.stats().failures, 1);
}

#[tokio::test]
async fn test_invalid_seed_is_rejected() {
    let crawler = Crawler::new(create_test_config(4)).unwrap();

    let result = crawler.crawl("not a url", 10).await;
    assert!(matches!(result, Err(CrawlError::Url(_))));

    let result = crawler.crawl("ftp://example.com", 10).await;
    assert!(matches!(result, Err(CrawlError::Url(_))));
}

#[tokio::test]
async fn test_crate_level_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("Home", &["/a"])).await;
    mount_page(&server, "/a", page("Page A", &[])).await;

    let (text, count) = site_harvest::crawl(&base, 5).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        text,
        format!("--- PAGE: {base} ---\nHome\n\n--- PAGE: {base}/a ---\nPage A")
    );
}
